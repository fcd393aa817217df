use super::model::{Element, Table};

/// Anything that accepts a loaded buffer as raw bytes, e.g. a GPU buffer
/// upload.  `stride` is the size of one row in bytes.
pub trait BufferSink {
    fn accept(&mut self, bytes: &[u8], stride: usize);
}

/// Collects uploads in memory.
impl BufferSink for Vec<u8> {
    fn accept(&mut self, bytes: &[u8], _stride: usize) {
        self.extend_from_slice(bytes);
    }
}

impl<T: Element> Table<T> {
    /// Hand the whole buffer to `sink` in one call.
    pub fn upload_to<S: BufferSink + ?Sized>(&self, sink: &mut S) {
        log::debug!(
            "uploading {} bytes ({} per row) of {}",
            self.byte_size(),
            self.stride(),
            T::NAME
        );
        sink.accept(self.as_bytes(), self.stride());
    }
}
