//! Filesystem operations
//!
//! Every low-level filesystem access goes through this module. Each
//! function independently translates names through the codec at its own
//! boundary; functions never call each other, so a name is translated
//! exactly once per call. The two sanctioned exceptions are
//! `delete_directory_recursive` and `copy_directory_recursive`, which
//! recurse into themselves while translating child names at every level.
//!
//! Underlying OS errors (permission denied, disk full, I/O failure) are
//! expected here: they are logged and returned as soft [`StorageError`]
//! values for the dispatcher to turn into the JSON failure response. Only
//! the dispatcher escalates hard failures.

use std::fs::{self, OpenOptions};
use std::time::SystemTime;

use log::warn;

use crate::error::StorageError;
use crate::storage::codec;

/// True when the path exists (file or directory).
pub fn exists(path: &str) -> bool {
    fs::metadata(codec::to_native(path)).is_ok()
}

/// True when the path exists and is a directory.
pub fn is_directory(path: &str) -> bool {
    fs::metadata(codec::to_native(path))
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Byte size of a file; 0 for directories and unreadable paths.
pub fn file_size(path: &str) -> u64 {
    fs::metadata(codec::to_native(path))
        .map(|m| if m.is_dir() { 0 } else { m.len() })
        .unwrap_or(0)
}

/// Last-modified timestamp, when the filesystem can report one.
pub fn modified_time(path: &str) -> Option<SystemTime> {
    fs::metadata(codec::to_native(path))
        .and_then(|m| m.modified())
        .ok()
}

/// Raw entry names of a directory, encoding-translated, including the `.`
/// and `..` entries the platform APIs conventionally report. Callers filter
/// the dot entries themselves.
pub fn list_directory(path: &str) -> Result<Vec<String>, StorageError> {
    let mut names = vec![".".to_string(), "..".to_string()];
    let entries = fs::read_dir(codec::to_native(path)).map_err(|e| {
        warn!("Failed to list directory {}: {}", path, e);
        StorageError::from(e)
    })?;
    for entry in entries {
        let entry = entry.map_err(StorageError::from)?;
        names.push(codec::from_native(&entry.file_name()));
    }
    Ok(names)
}

/// Read the full content of a file.
pub fn read_file(path: &str) -> Result<Vec<u8>, StorageError> {
    fs::read(codec::to_native(path)).map_err(|e| {
        warn!("Failed to read {}: {}", path, e);
        StorageError::from(e)
    })
}

/// Overwrite a file with the given content.
pub fn write_file(path: &str, content: &[u8]) -> Result<(), StorageError> {
    fs::write(codec::to_native(path), content).map_err(|e| {
        warn!("Failed to write {}: {}", path, e);
        StorageError::from(e)
    })
}

/// Create an empty file. Fails when the parent directory is missing or the
/// file already exists.
pub fn create_file(path: &str) -> Result<(), StorageError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(codec::to_native(path))
        .map(|_| ())
        .map_err(|e| {
            warn!("Failed to create file {}: {}", path, e);
            StorageError::from(e)
        })
}

/// Create a single directory level.
pub fn create_directory(path: &str) -> Result<(), StorageError> {
    fs::create_dir(codec::to_native(path)).map_err(|e| {
        warn!("Failed to create directory {}: {}", path, e);
        StorageError::from(e)
    })
}

/// Delete a single file.
pub fn delete_file(path: &str) -> Result<(), StorageError> {
    fs::remove_file(codec::to_native(path)).map_err(|e| {
        warn!("Failed to delete {}: {}", path, e);
        StorageError::from(e)
    })
}

/// Delete a directory tree: children first (recursing into
/// subdirectories), then the emptied directory itself. Child names are
/// translated at each recursive boundary.
pub fn delete_directory_recursive(path: &str) -> Result<(), StorageError> {
    let entries = fs::read_dir(codec::to_native(path)).map_err(|e| {
        warn!("Failed to list directory {} for delete: {}", path, e);
        StorageError::from(e)
    })?;
    for entry in entries {
        let entry = entry.map_err(StorageError::from)?;
        let name = codec::from_native(&entry.file_name());
        let child = format!("{}/{}", path, name);
        let file_type = entry.file_type().map_err(StorageError::from)?;
        if file_type.is_dir() {
            delete_directory_recursive(&child)?;
        } else {
            fs::remove_file(codec::to_native(&child)).map_err(|e| {
                warn!("Failed to delete {}: {}", child, e);
                StorageError::from(e)
            })?;
        }
    }
    fs::remove_dir(codec::to_native(path)).map_err(|e| {
        warn!("Failed to remove directory {}: {}", path, e);
        StorageError::from(e)
    })
}

/// Copy a single file.
pub fn copy_file(src: &str, dst: &str) -> Result<(), StorageError> {
    fs::copy(codec::to_native(src), codec::to_native(dst))
        .map(|_| ())
        .map_err(|e| {
            warn!("Failed to copy {} to {}: {}", src, dst, e);
            StorageError::from(e)
        })
}

/// Copy a directory tree: creates `dst`, copies files directly and
/// subdirectories via recursion, translating child names at each level.
pub fn copy_directory_recursive(src: &str, dst: &str) -> Result<(), StorageError> {
    fs::create_dir(codec::to_native(dst)).map_err(|e| {
        warn!("Failed to create directory {}: {}", dst, e);
        StorageError::from(e)
    })?;
    let entries = fs::read_dir(codec::to_native(src)).map_err(|e| {
        warn!("Failed to list directory {} for copy: {}", src, e);
        StorageError::from(e)
    })?;
    for entry in entries {
        let entry = entry.map_err(StorageError::from)?;
        let name = codec::from_native(&entry.file_name());
        let from = format!("{}/{}", src, name);
        let to = format!("{}/{}", dst, name);
        let file_type = entry.file_type().map_err(StorageError::from)?;
        if file_type.is_dir() {
            copy_directory_recursive(&from, &to)?;
        } else {
            fs::copy(codec::to_native(&from), codec::to_native(&to)).map_err(|e| {
                warn!("Failed to copy {} to {}: {}", from, to, e);
                StorageError::from(e)
            })?;
        }
    }
    Ok(())
}

/// Rename an item. Used for both rename and move.
pub fn rename(src: &str, dst: &str) -> Result<(), StorageError> {
    fs::rename(codec::to_native(src), codec::to_native(dst)).map_err(|e| {
        warn!("Failed to rename {} to {}: {}", src, dst, e);
        StorageError::from(e)
    })
}

/// Persist an upload payload. The content is written to a temporary
/// sibling first and renamed into place, so an interrupted write leaves no
/// partial destination file.
pub fn save_upload(content: &[u8], dst: &str) -> Result<(), StorageError> {
    let tmp = format!("{}.part", dst);
    if let Err(e) = fs::write(codec::to_native(&tmp), content) {
        warn!("Failed to stage upload {}: {}", tmp, e);
        let _ = fs::remove_file(codec::to_native(&tmp));
        return Err(StorageError::from(e));
    }
    fs::rename(codec::to_native(&tmp), codec::to_native(dst)).map_err(|e| {
        warn!("Failed to finalize upload {}: {}", dst, e);
        let _ = fs::remove_file(codec::to_native(&tmp));
        StorageError::from(e)
    })
}
