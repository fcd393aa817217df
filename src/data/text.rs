use std::fs;
use std::io::{self, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// TextFile – full text of a file, line oriented
// ---------------------------------------------------------------------------

/// The full text of a file along with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub path: PathBuf,
    pub text: String,
}

impl TextFile {
    /// Read a whole file.  The handle is closed before this returns.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            let err = open_error(path, e);
            error!("{err}");
            err
        })?;
        debug!("read {} bytes from '{}'", text.len(), path.display());
        Ok(TextFile {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Line-by-line view.  A trailing newline does not produce an extra line
    /// and `\r\n` endings are stripped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Write `self.text` to `path`.
    ///
    /// A failure is logged and returned as [`LoadError::WriteFailure`]; it is
    /// never retried and callers that ignore the result must not assume the
    /// file exists.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), &self.text)
    }

    /// Turn the text into the transient line sequence the loaders consume.
    pub fn into_source(self) -> SourceFile {
        let lines = self.text.lines().map(str::to_owned).collect();
        SourceFile {
            path: self.path,
            lines,
        }
    }
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    match fs::write(path, text) {
        Ok(()) => {
            info!("wrote {} bytes to '{}'", text.len(), path.display());
            Ok(())
        }
        Err(source) => {
            warn!("Unable to open file '{}' for writing: {source}", path.display());
            Err(LoadError::WriteFailure {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn open_error(path: &Path, source: io::Error) -> LoadError {
    match source.kind() {
        IoErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    }
}

// ---------------------------------------------------------------------------
// SourceFile – path + raw lines, only alive for the duration of a load
// ---------------------------------------------------------------------------

/// A path plus its raw line sequence.  Consumed by a single load; the path is
/// only kept around for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        TextFile::read(path).map(TextFile::into_source)
    }

    /// Build a source from in-memory text, e.g. for tests.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        SourceFile {
            path: path.into(),
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextFile::read(dir.path().join("nope.arr")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::FileNotFound);
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let file = TextFile {
            path: PathBuf::from("memory"),
            text: "a b\nc d\n".into(),
        };
        file.write(&path).unwrap();

        let back = TextFile::read(&path).unwrap();
        assert_eq!(back.text, "a b\nc d\n");
        assert_eq!(back.lines().collect::<Vec<_>>(), vec!["a b", "c d"]);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile {
            path: PathBuf::from("memory"),
            text: "1\n".into(),
        };
        let err = file.write(dir.path().join("no/such/dir/out.txt")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::WriteFailure);
    }

    #[test]
    fn lines_strip_crlf_and_keep_blank_lines() {
        let src = SourceFile::from_text("x", "1 2\r\n\r\n3 4");
        assert_eq!(src.lines, vec!["1 2", "", "3 4"]);
        assert_eq!(src.num_lines(), 3);
    }
}
