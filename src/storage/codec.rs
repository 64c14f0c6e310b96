//! Filename encoding translation
//!
//! The transport layer speaks UTF-8 (JSON, form fields); the host
//! filesystem speaks its own native encoding (`OsStr`). This module is the
//! single point where names cross that boundary: encode on the way in,
//! decode on the way out. Every storage operation performs the translation
//! itself and translated names are never passed between layers, so a name
//! can never be translated twice.

use std::ffi::{OsStr, OsString};

/// Translate a transport-encoded name to the host filesystem encoding.
pub fn to_native(name: &str) -> OsString {
    OsString::from(name)
}

/// Translate a native filesystem name back to the transport encoding.
///
/// Names that are not valid in the transport encoding are decoded lossily;
/// the replacement character keeps the entry visible in listings instead of
/// dropping it.
pub fn from_native(name: &OsStr) -> String {
    name.to_string_lossy().into_owned()
}
