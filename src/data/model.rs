use std::fmt;
use std::mem::size_of;
use std::path::Path;

use bytemuck::Pod;
use serde::Serialize;

use crate::data::text::write_text;
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Element – the numeric types a table can hold
// ---------------------------------------------------------------------------

/// A numeric element type a table can be loaded as.
///
/// Only `i32` and `f32` implement it; a table never mixes the two.
pub trait Element: Pod + Serialize + fmt::Display + fmt::Debug + PartialEq + Send {
    /// Short human-readable name, used in log lines.
    const NAME: &'static str;

    /// Parse one whitespace-delimited token.
    fn parse_token(token: &str) -> Option<Self>;
}

impl Element for i32 {
    const NAME: &'static str = "int32";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Element for f32 {
    const NAME: &'static str = "float32";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// Table – a loaded rectangular array, row-major
// ---------------------------------------------------------------------------

/// A rectangular numeric table stored as one row-major buffer.
///
/// `data.len() == rows * cols` holds for every value of this type: the only
/// ways to build one are the loaders and [`Table::from_rows`], which both
/// check the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<T: Element> {
    rows: u32,
    cols: u32,
    data: Vec<T>,
}

impl<T: Element> Table<T> {
    pub(crate) fn from_parts(rows: u32, cols: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows as usize * cols as usize);
        Table { rows, cols, data }
    }

    /// Build a table from nested rows.  Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let data: Vec<T> = rows.iter().flatten().copied().collect();
        Some(Table {
            rows: u32::try_from(rows.len()).ok()?,
            cols: u32::try_from(cols).ok()?,
            data,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of elements (`rows * cols`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total size of the buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len() * size_of::<T>()
    }

    /// Size of one row in bytes.
    pub fn stride(&self) -> usize {
        self.cols as usize * size_of::<T>()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the values.  The shape stays fixed.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Raw bytes of the buffer, for a binary consumer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        let cols = self.cols as usize;
        let start = index.checked_mul(cols)?;
        if index >= self.rows as usize {
            return None;
        }
        Some(&self.data[start..start + cols])
    }

    /// Iterate rows as slices.  A zero-column table yields nothing.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.cols.max(1) as usize)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Space-separated tokens, one row per line, newline terminated.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows as usize {
            let line: Vec<String> = self
                .row(row)
                .unwrap_or_default()
                .iter()
                .map(T::to_string)
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Write the table back out in the whitespace format it is loaded from.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), &self.to_text())
    }

    /// Header-less CSV, one record per row.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let csv_err = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        for row in 0..self.rows as usize {
            let record = self.row(row).unwrap_or_default().iter().map(T::to_string);
            writer.write_record(record).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| LoadError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} CSV records to '{}'", self.rows, path.display());
        Ok(())
    }

    /// `{"rows": .., "cols": .., "data": [..]}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Comma-separated values, one row per line.
impl<T: Element> fmt::Display for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            let mut first = true;
            for v in row {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
