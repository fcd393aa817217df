use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;

use arrfile::{load_file, Element, ScalarOp, Table};

#[derive(Parser)]
#[command(name = "arrfile", version, about = "Inspect and transform numeric array files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Int,
    Float,
}

#[derive(Subcommand)]
enum Command {
    /// Print the shape and buffer size of a file.
    Info {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "float")]
        kind: Kind,
    },
    /// Print the values, comma separated, one row per line.
    Print {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "float")]
        kind: Kind,
    },
    /// Apply scalar arithmetic to a float file (add, sub, mul, div in that order).
    Transform {
        file: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        add: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        sub: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        mul: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        div: Option<f32>,
    },
    /// Re-write a file as .arr/.txt, .csv or .json (picked from the output extension).
    Convert {
        file: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value = "float")]
        kind: Kind,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Info { file, kind } => match kind {
            Kind::Int => info::<i32>(&file),
            Kind::Float => info::<f32>(&file),
        },
        Command::Print { file, kind } => match kind {
            Kind::Int => print::<i32>(&file),
            Kind::Float => print::<f32>(&file),
        },
        Command::Transform {
            file,
            out,
            add,
            sub,
            mul,
            div,
        } => {
            let ops: Vec<ScalarOp> = [
                add.map(ScalarOp::Add),
                sub.map(ScalarOp::Sub),
                mul.map(ScalarOp::Mul),
                div.map(ScalarOp::Div),
            ]
            .into_iter()
            .flatten()
            .collect();
            transform(&file, &out, &ops)
        }
        Command::Convert { file, out, kind } => match kind {
            Kind::Int => convert::<i32>(&file, &out),
            Kind::Float => convert::<f32>(&file, &out),
        },
    }
}

fn load<T: Element>(path: &Path) -> Result<Table<T>> {
    load_file(path).with_context(|| format!("loading {} table from {}", T::NAME, path.display()))
}

fn info<T: Element>(path: &Path) -> Result<()> {
    let table = load::<T>(path)?;
    println!("file:      {}", path.display());
    println!("type:      {}", T::NAME);
    println!("rows:      {}", table.rows());
    println!("cols:      {}", table.cols());
    println!("length:    {}", table.len());
    println!("byte size: {}", table.byte_size());
    Ok(())
}

fn print<T: Element>(path: &Path) -> Result<()> {
    let table = load::<T>(path)?;
    print!("{table}");
    Ok(())
}

fn transform(path: &Path, out: &Path, ops: &[ScalarOp]) -> Result<()> {
    if ops.is_empty() {
        warn!("no operation given, copying values unchanged");
    }
    let mut table = load::<f32>(path)?;
    for &op in ops {
        table.apply(op);
    }
    write(&table, out)
}

fn convert<T: Element>(path: &Path, out: &Path) -> Result<()> {
    let table = load::<T>(path)?;
    write(&table, out)
}

fn write<T: Element>(table: &Table<T>, out: &Path) -> Result<()> {
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let written = match ext.as_str() {
        "" | "arr" | "txt" | "dat" => table.write(out),
        "csv" => table.write_csv(out),
        "json" => {
            let json = table.to_json()?;
            std::fs::write(out, json).map_err(|source| arrfile::LoadError::WriteFailure {
                path: out.to_path_buf(),
                source,
            })
        }
        other => bail!("Unsupported output extension: .{other}"),
    };
    written.with_context(|| format!("writing {}", out.display()))
}
