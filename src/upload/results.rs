//! Upload results
//!
//! Outcome of persisting an upload batch, as reported to the dispatcher.

use crate::error::StorageError;

/// One file received in a multipart upload, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Soft outcome of an upload batch. Hard validation errors are raised
/// separately and never reach this type.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Every file in the batch was persisted.
    Saved,
    /// A file failed to persist; the batch stopped there. Earlier files
    /// remain on disk.
    Failed(StorageError),
}
