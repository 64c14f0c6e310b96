//! Upload persistence
//!
//! Validates and persists multipart upload payloads into the target
//! directory. The batch is processed in order and stops at the first soft
//! save failure; it succeeds only when every file persisted.

use log::info;

use crate::error::DispatchError;
use crate::storage::{check_filename, filesystem};
use crate::upload::results::{UploadOutcome, UploadedFile};

/// Persist a batch of uploaded files into `root + dir`.
///
/// Hard failures: an empty batch, an existing same-named destination, an
/// upload exceeding `max_upload_kb` (0 = unlimited, checked before any
/// byte is written so an oversized upload leaves no partial file), or an
/// upload name carrying traversal tokens.
pub fn handle_upload(
    root: &str,
    dir: &str,
    uploads: &[UploadedFile],
    max_upload_kb: u64,
) -> Result<UploadOutcome, DispatchError> {
    if uploads.is_empty() {
        return Err(DispatchError::NoFiles);
    }

    for upload in uploads {
        let dest = format!("{}{}{}", root, dir, upload.name);
        if filesystem::exists(&dest) {
            return Err(DispatchError::DestinationExists(upload.name.clone()));
        }
        if max_upload_kb > 0 && max_upload_kb * 1000 < upload.data.len() as u64 {
            return Err(DispatchError::FileTooLarge(upload.name.clone()));
        }
        check_filename(&upload.name)?;
        if let Err(e) = filesystem::save_upload(&upload.data, &dest) {
            return Ok(UploadOutcome::Failed(e));
        }
        info!(
            "Stored upload {}{} ({} bytes)",
            dir,
            upload.name,
            upload.data.len()
        );
    }

    Ok(UploadOutcome::Saved)
}
