//! Loader for whitespace-delimited numeric array files.
//!
//! An array file holds one row per line, every row with the same number of
//! values:
//!
//! ```text
//! 0.0  0.5 0.0
//! -0.5 -0.5 0.0
//! 0.5 -0.5 0.0
//! ```
//!
//! Loading yields a [`Table`] whose flat row-major buffer can be handed
//! straight to a vertex or index buffer upload.
//!
//! ```no_run
//! use arrfile::{load_float_table, FloatArrayFile};
//!
//! let verts = load_float_table("data/vertices.arr")?;
//! println!("{} vertices, {} bytes", verts.rows(), verts.byte_size());
//!
//! let mut file = FloatArrayFile::new();
//! file.read("data/vertices.arr")?;
//! file.mul(0.5)?.add(0.25)?;
//! # Ok::<(), arrfile::LoadError>(())
//! ```

pub mod data;
pub mod error;
pub mod state;

pub use data::loader::{load_file, load_float_table, load_int_table, load_table, DelimitedRowLoader};
pub use data::model::{Element, Table};
pub use data::ops::ScalarOp;
pub use data::sink::BufferSink;
pub use data::text::{SourceFile, TextFile};
pub use error::{ErrorKind, LoadError};
pub use state::{ArrayFile, FloatArrayFile, IntArrayFile};
