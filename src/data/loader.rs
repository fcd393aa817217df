use std::path::Path;

use log::{debug, error, info};

use super::model::{Element, Table};
use super::text::SourceFile;
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.arr` / `.txt` / `.dat` / none – whitespace separated, one row per line
/// * `.csv` – comma separated, no header row
pub fn load_file<T: Element>(path: &Path) -> Result<Table<T>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "" | "arr" | "txt" | "dat" => load_table(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension {
            ext: other.to_string(),
        }),
    }
}

/// Load a whitespace-delimited table of `T`.
pub fn load_table<T: Element>(path: impl AsRef<Path>) -> Result<Table<T>> {
    let source = SourceFile::open(path)?;
    let table = DelimitedRowLoader::new(&source).load(T::parse_token)?;
    info!(
        "loaded {}x{} {} table from '{}' ({} bytes)",
        table.rows(),
        table.cols(),
        T::NAME,
        source.path.display(),
        table.byte_size()
    );
    Ok(table)
}

pub fn load_int_table(path: impl AsRef<Path>) -> Result<Table<i32>> {
    load_table(path)
}

pub fn load_float_table(path: impl AsRef<Path>) -> Result<Table<f32>> {
    load_table(path)
}

// ---------------------------------------------------------------------------
// DelimitedRowLoader – shape discovery and row-major fill
// ---------------------------------------------------------------------------

/// Turns the lines of a [`SourceFile`] into a [`Table`].
///
/// The row count is the number of lines (blank lines included) and the column
/// count is the number of tokens on the first line.  Every line, the first
/// one included, must then supply exactly that many tokens; the first line
/// that does not aborts the load.
pub struct DelimitedRowLoader<'a> {
    source: &'a SourceFile,
}

impl<'a> DelimitedRowLoader<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        DelimitedRowLoader { source }
    }

    /// Run the load, turning each token into a `T` with `parse`.
    pub fn load<T, F>(&self, parse: F) -> Result<Table<T>>
    where
        T: Element,
        F: Fn(&str) -> Option<T>,
    {
        let rows: Vec<TextLine<'_>> = self
            .source
            .lines
            .iter()
            .enumerate()
            .map(|(i, text)| TextLine { line: i + 1, text })
            .collect();
        fill_rows(&self.source.path, &rows, parse)
    }
}

/// One input row as seen by [`fill_rows`].
trait RowSource {
    /// 1-based line in the file.
    fn line(&self) -> usize;
    fn text(&self) -> String;
    fn tokens(&self) -> Vec<&str>;
    /// Most tokens this row could possibly hold.
    fn max_tokens(&self) -> usize;
}

struct TextLine<'a> {
    line: usize,
    text: &'a str,
}

impl RowSource for TextLine<'_> {
    fn line(&self) -> usize {
        self.line
    }

    fn text(&self) -> String {
        self.text.to_owned()
    }

    fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    // Tokens are separated by at least one whitespace byte.
    fn max_tokens(&self) -> usize {
        self.text.len() / 2 + 1
    }
}

struct CsvRow {
    index: usize,
    record: csv::StringRecord,
}

impl RowSource for CsvRow {
    fn line(&self) -> usize {
        self.record
            .position()
            .map_or(self.index + 1, |p| p.line() as usize)
    }

    fn text(&self) -> String {
        self.record.iter().collect::<Vec<_>>().join(",")
    }

    fn tokens(&self) -> Vec<&str> {
        self.record.iter().collect()
    }

    fn max_tokens(&self) -> usize {
        self.record.len()
    }
}

/// Shape discovery and row-major fill shared by every format.
fn fill_rows<T, R, F>(path: &Path, rows: &[R], parse: F) -> Result<Table<T>>
where
    T: Element,
    R: RowSource,
    F: Fn(&str) -> Option<T>,
{
    let Some(first) = rows.first() else {
        error!("'{}' is empty, nothing to load", path.display());
        return Err(LoadError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let cols = first.tokens().len();
    debug!(
        "'{}': {} rows, {cols} columns (from line {})",
        path.display(),
        rows.len(),
        first.line()
    );

    let too_large = || LoadError::TooLarge {
        path: path.to_path_buf(),
    };
    let rows_u32 = u32::try_from(rows.len()).map_err(|_| too_large())?;
    let cols_u32 = u32::try_from(cols).map_err(|_| too_large())?;
    let len = rows_u32.checked_mul(cols_u32).ok_or_else(too_large)? as usize;

    // The claimed shape is unchecked until every row has been read, so only
    // reserve what the input could actually supply.
    let supply: usize = rows.iter().map(RowSource::max_tokens).sum();
    let mut data = Vec::with_capacity(len.min(supply));

    for row in rows {
        let tokens = row.tokens();
        if tokens.len() != cols {
            let err = LoadError::RowShapeMismatch {
                path: path.to_path_buf(),
                line: row.line(),
                text: row.text(),
                expected: cols,
                actual: tokens.len(),
            };
            error!("{err}");
            return Err(err);
        }
        for token in tokens {
            let value = parse(token).ok_or_else(|| LoadError::InvalidNumber {
                path: path.to_path_buf(),
                line: row.line(),
                token: token.to_owned(),
            })?;
            data.push(value);
        }
    }

    Ok(Table::from_parts(rows_u32, cols_u32, data))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header-less CSV.  Uses the same row-1 column policy as the whitespace
/// format; ragged records are reported as a shape mismatch against their
/// line in the file.  The `csv` reader skips blank lines.
fn load_csv<T: Element>(path: &Path) -> Result<Table<T>> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            let missing = matches!(
                e.kind(),
                csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
            );
            if missing {
                error!("Couldn't open file '{}'. Please check it exists", path.display());
                LoadError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                csv_err(e)
            }
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        rows.push(CsvRow { index, record });
    }

    let table = fill_rows(path, &rows, T::parse_token)?;
    info!(
        "loaded {}x{} {} table from '{}'",
        table.rows(),
        table.cols(),
        T::NAME,
        path.display()
    );
    Ok(table)
}
