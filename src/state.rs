use std::path::{Path, PathBuf};

use crate::data::loader::load_file;
use crate::data::model::{Element, Table};
use crate::data::ops::ScalarOp;
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// ArrayFile – a handle that may or may not hold a loaded table
// ---------------------------------------------------------------------------

/// A reader handle for one array file.
///
/// Starts empty; [`ArrayFile::read`] fills it.  Everything that needs data
/// fails with [`LoadError::NotLoaded`] until a load has succeeded.  A failed
/// load leaves the handle as it was before the call.
#[derive(Debug, Clone)]
pub struct ArrayFile<T: Element> {
    /// Path of the last successful load.
    pub path: Option<PathBuf>,

    table: Option<Table<T>>,
}

pub type IntArrayFile = ArrayFile<i32>;
pub type FloatArrayFile = ArrayFile<f32>;

impl<T: Element> Default for ArrayFile<T> {
    fn default() -> Self {
        Self {
            path: None,
            table: None,
        }
    }
}

impl<T: Element> ArrayFile<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, replacing any table held before.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<&Table<T>> {
        let path = path.as_ref();
        let table = load_file(path)?;
        self.path = Some(path.to_path_buf());
        Ok(&*self.table.insert(table))
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Result<&Table<T>> {
        self.table.as_ref().ok_or(LoadError::NotLoaded)
    }

    pub fn table_mut(&mut self) -> Result<&mut Table<T>> {
        self.table.as_mut().ok_or(LoadError::NotLoaded)
    }

    /// Give up ownership of the loaded table, leaving the handle empty.
    pub fn take(&mut self) -> Result<Table<T>> {
        self.path = None;
        self.table.take().ok_or(LoadError::NotLoaded)
    }

    /// Write the loaded table back out as whitespace-separated text.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        self.table()?.write(path)
    }
}

impl ArrayFile<f32> {
    pub fn apply(&mut self, op: ScalarOp) -> Result<&mut Self> {
        self.table_mut()?.apply(op);
        Ok(self)
    }

    pub fn add(&mut self, s: f32) -> Result<&mut Self> {
        self.apply(ScalarOp::Add(s))
    }

    pub fn sub(&mut self, s: f32) -> Result<&mut Self> {
        self.apply(ScalarOp::Sub(s))
    }

    pub fn mul(&mut self, s: f32) -> Result<&mut Self> {
        self.apply(ScalarOp::Mul(s))
    }

    pub fn div(&mut self, s: f32) -> Result<&mut Self> {
        self.apply(ScalarOp::Div(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn ops_before_load_are_rejected() {
        let mut file = FloatArrayFile::new();
        assert_eq!(file.add(1.0).unwrap_err().kind(), ErrorKind::NotLoaded);
        assert_eq!(file.div(2.0).unwrap_err().kind(), ErrorKind::NotLoaded);
        assert_eq!(file.table().unwrap_err().kind(), ErrorKind::NotLoaded);
        assert!(!file.is_loaded());
    }

    #[test]
    fn read_then_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verts.arr");
        std::fs::write(&path, "0.5 1.0\n-1.0 2.0\n").unwrap();

        let mut file = FloatArrayFile::new();
        file.read(&path).unwrap();
        file.mul(2.0).unwrap().add(1.0).unwrap();

        assert_eq!(file.table().unwrap().data(), &[2.0, 3.0, -1.0, 5.0]);
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn failed_read_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.arr");
        let bad = dir.path().join("bad.arr");
        std::fs::write(&good, "1 2\n").unwrap();
        std::fs::write(&bad, "1 2\n3\n").unwrap();

        let mut file = IntArrayFile::new();
        file.read(&good).unwrap();
        assert!(file.read(&bad).is_err());
        assert_eq!(file.table().unwrap().data(), &[1, 2]);
        assert_eq!(file.path.as_deref(), Some(good.as_path()));
    }

    #[test]
    fn take_empties_the_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idx.arr");
        std::fs::write(&path, "0 1 2\n").unwrap();

        let mut file = IntArrayFile::new();
        file.read(&path).unwrap();
        let table = file.take().unwrap();
        assert_eq!(table.len(), 3);
        assert!(!file.is_loaded());
        assert_eq!(file.take().unwrap_err().kind(), ErrorKind::NotLoaded);
    }
}
