use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – everything that can go wrong while reading or writing a table
// ---------------------------------------------------------------------------

/// Failure of a load, write or transform operation.
///
/// The message carries the diagnostic text (file, line, counts); programmatic
/// callers should match on [`LoadError::kind`] instead of the message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't open file '{}', please check it exists", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("couldn't read file '{}'", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file '{}' contains no rows", .path.display())]
    EmptyFile { path: PathBuf },

    #[error(
        "incorrect number of values in line {line} of '{}'\n\t* Line = '{text}'\n\t* Expected = {expected}\n\t* Found = {actual}",
        .path.display()
    )]
    RowShapeMismatch {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        text: String,
        expected: usize,
        actual: usize,
    },

    #[error("line {line} of '{}': '{token}' is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("'{}' has more rows or columns than a table can index", .path.display())]
    TooLarge { path: PathBuf },

    #[error("no table loaded")]
    NotLoaded,

    #[error("unable to write file '{}'", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in '{}'", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: .{ext}")]
    UnsupportedExtension { ext: String },
}

/// Message-free classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    FileUnreadable,
    EmptyFile,
    RowShapeMismatch,
    InvalidNumber,
    TooLarge,
    NotLoaded,
    WriteFailure,
    Csv,
    Json,
    UnsupportedExtension,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::FileNotFound { .. } => ErrorKind::FileNotFound,
            LoadError::FileUnreadable { .. } => ErrorKind::FileUnreadable,
            LoadError::EmptyFile { .. } => ErrorKind::EmptyFile,
            LoadError::RowShapeMismatch { .. } => ErrorKind::RowShapeMismatch,
            LoadError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            LoadError::TooLarge { .. } => ErrorKind::TooLarge,
            LoadError::NotLoaded => ErrorKind::NotLoaded,
            LoadError::WriteFailure { .. } => ErrorKind::WriteFailure,
            LoadError::Csv { .. } => ErrorKind::Csv,
            LoadError::Json(_) => ErrorKind::Json,
            LoadError::UnsupportedExtension { .. } => ErrorKind::UnsupportedExtension,
        }
    }
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_line_and_counts() {
        let err = LoadError::RowShapeMismatch {
            path: PathBuf::from("verts.arr"),
            line: 2,
            text: "3.0".into(),
            expected: 2,
            actual: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 2"));
        assert!(msg.contains("'3.0'"));
        assert!(msg.contains("Expected = 2"));
        assert!(msg.contains("Found = 1"));
        assert_eq!(err.kind(), ErrorKind::RowShapeMismatch);
    }
}
