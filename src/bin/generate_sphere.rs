use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write the vertex and index array files of a sphere mesh.
#[derive(Parser)]
#[command(name = "generate_sphere")]
struct Args {
    /// Distance of every vertex from the origin.
    #[arg(long, default_value_t = 0.7)]
    radius: f64,
    /// Number of times each triangle is split in four (0 to 10).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=MAX_RESOLUTION as i64))]
    resolution: u32,
    /// Directory receiving `vertices.arr` and `elements.arr`.
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,
}

/// 8 * 4^10 triangles; every vertex index still fits a `u32`.
const MAX_RESOLUTION: u32 = 10;

type Vec3 = [f64; 3];

struct Mesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

fn octahedron() -> Mesh {
    Mesh {
        vertices: vec![
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [-0.0, -1.0, 0.0],
            [0.0, 0.0, -1.0],
        ],
        triangles: vec![
            [0, 1, 2],
            [0, 2, 3],
            [0, 3, 4],
            [0, 4, 1],
            [5, 1, 2],
            [5, 2, 3],
            [5, 3, 4],
            [5, 4, 1],
        ],
    }
}

/// Split every triangle into four through its edge midpoints.  Midpoints are
/// not shared between neighbouring triangles.
fn subdivide(mesh: Mesh) -> Mesh {
    let Mesh {
        mut vertices,
        triangles,
    } = mesh;
    let mut out = Vec::with_capacity(triangles.len() * 4);

    for [i0, i1, i2] in triangles {
        let (p0, p1, p2) = (
            vertices[i0 as usize],
            vertices[i1 as usize],
            vertices[i2 as usize],
        );
        let m = vertices.len() as u32;
        vertices.extend([midpoint(p0, p1), midpoint(p0, p2), midpoint(p1, p2)]);

        out.push([i0, m, m + 1]);
        out.push([i1, m, m + 2]);
        out.push([i2, m + 2, m + 1]);
        out.push([m, m + 1, m + 2]);
    }

    Mesh {
        vertices,
        triangles: out,
    }
}

fn sphere(radius: f64, resolution: u32) -> Mesh {
    let mut mesh = octahedron();
    for _ in 0..resolution {
        mesh = subdivide(mesh);
    }
    for v in &mut mesh.vertices {
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        for c in v.iter_mut() {
            *c = *c / norm * radius;
        }
    }
    mesh
}

fn vertices_text(mesh: &Mesh) -> String {
    mesh.vertices
        .iter()
        .map(|v| {
            let line = format!("{:.5} {:.5} {:.5}", v[0], v[1], v[2]);
            format!("{line:<26}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn elements_text(mesh: &Mesh) -> String {
    mesh.triangles
        .iter()
        .map(|t| format!("{} {} {}", t[0], t[1], t[2]))
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mesh = sphere(args.radius, args.resolution);
    log::debug!(
        "sphere r={} after {} subdivisions: {} vertices",
        args.radius,
        args.resolution,
        mesh.vertices.len()
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let vert_path = args.out_dir.join("vertices.arr");
    let elem_path = args.out_dir.join("elements.arr");
    fs::write(&vert_path, vertices_text(&mesh))
        .with_context(|| format!("writing {}", vert_path.display()))?;
    fs::write(&elem_path, elements_text(&mesh))
        .with_context(|| format!("writing {}", elem_path.display()))?;

    println!(
        "Wrote {} vertices to {} and {} triangles to {}",
        mesh.vertices.len(),
        vert_path.display(),
        mesh.triangles.len(),
        elem_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_resolution() {
        let m = sphere(1.0, 0);
        assert_eq!((m.vertices.len(), m.triangles.len()), (6, 8));
        let m = sphere(1.0, 1);
        assert_eq!((m.vertices.len(), m.triangles.len()), (30, 32));
        let m = sphere(1.0, 2);
        assert_eq!((m.vertices.len(), m.triangles.len()), (126, 128));
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let m = sphere(0.7, 2);
        for v in &m.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.7).abs() < 1e-9);
        }
    }

    #[test]
    fn indices_in_range() {
        let m = sphere(1.0, 2);
        let n = m.vertices.len() as u32;
        assert!(m.triangles.iter().flatten().all(|&i| i < n));
    }

    #[test]
    fn resolution_is_bounded() {
        assert!(Args::try_parse_from(["generate_sphere", "--resolution", "10"]).is_ok());
        assert!(Args::try_parse_from(["generate_sphere", "--resolution", "11"]).is_err());
    }

    #[test]
    fn negative_zero_is_kept() {
        let text = vertices_text(&sphere(0.7, 0));
        let fifth = text.lines().nth(4).unwrap();
        assert!(fifth.starts_with("-0.00000 -0.70000 0.00000"));
    }

    #[test]
    fn written_files_reload_with_their_shape() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = sphere(0.7, 1);
        let vert_path = dir.path().join("vertices.arr");
        let elem_path = dir.path().join("elements.arr");
        fs::write(&vert_path, vertices_text(&mesh)).unwrap();
        fs::write(&elem_path, elements_text(&mesh)).unwrap();

        let verts = arrfile::load_float_table(&vert_path).unwrap();
        let elems = arrfile::load_int_table(&elem_path).unwrap();
        assert_eq!((verts.rows(), verts.cols()), (30, 3));
        assert_eq!((elems.rows(), elems.cols()), (32, 3));
        assert!(elems.data().iter().all(|&i| (i as u32) < verts.rows()));
    }

    #[test]
    fn vertex_lines_are_padded() {
        let text = vertices_text(&sphere(0.7, 0));
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), 26);
        assert!(first.starts_with("0.00000 0.00000 0.70000"));
        assert!(!text.ends_with('\n'));
    }
}
