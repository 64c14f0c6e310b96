//! Error types
//!
//! Defines the two failure channels of the file manager: hard dispatch
//! errors that abort the request, and soft storage/archive errors that the
//! dispatcher converts into the JSON failure response.

use std::fmt;
use std::io;

use zip::result::ZipError;

/// Hard failures: validation and configuration problems that abort request
/// processing. Converted to a non-2xx HTTP response at the transport
/// boundary, never to the soft JSON failure shape.
#[derive(Debug)]
pub enum DispatchError {
    Configuration(String),
    MissingParameter(&'static str),
    PathTraversal(String),
    UnknownAction(String),
    SourceNotFound(String),
    DestinationExists(String),
    NoFiles,
    FileTooLarge(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DispatchError::MissingParameter(name) => {
                write!(f, "Missing or malformed parameter: {}", name)
            }
            DispatchError::PathTraversal(p) => {
                write!(f, "Relative paths are not allowed: {}", p)
            }
            DispatchError::UnknownAction(code) => write!(f, "Unknown action: {}", code),
            DispatchError::SourceNotFound(p) => write!(f, "Source does not exist: {}", p),
            DispatchError::DestinationExists(p) => write!(f, "Destination already exists: {}", p),
            DispatchError::NoFiles => write!(f, "No files for upload"),
            DispatchError::FileTooLarge(name) => write!(f, "File too large: {}", name),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Soft failures from the storage layer. Expected and recoverable: the
/// dispatcher renders them as `{"result":"0", ...}` so the widget can show a
/// message without the request itself failing.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    InvalidName(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::InvalidName(name) => write!(f, "Invalid name: {}", name),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Soft failures from the archive engine.
#[derive(Debug)]
pub enum ArchiveError {
    Io(io::Error),
    Zip(ZipError),
    Storage(StorageError),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Io(e) => write!(f, "I/O error: {}", e),
            ArchiveError::Zip(e) => write!(f, "Zip error: {}", e),
            ArchiveError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<io::Error> for ArchiveError {
    fn from(error: io::Error) -> Self {
        ArchiveError::Io(error)
    }
}

impl From<ZipError> for ArchiveError {
    fn from(error: ZipError) -> Self {
        ArchiveError::Zip(error)
    }
}

impl From<StorageError> for ArchiveError {
    fn from(error: StorageError) -> Self {
        ArchiveError::Storage(error)
    }
}
