//! Path validation
//!
//! Syntactic checks on untrusted path strings, applied before any
//! concatenation with the configured root. The check rejects literal
//! traversal tokens only; it does not canonicalize and does not resolve
//! symlinks, so it is not a defense against symlink-based escapes.

use crate::error::DispatchError;

/// Reject a path that could climb out of the root via `..` segments.
///
/// Fails when the path equals `..`, starts with `../`, ends with `/..`, or
/// contains `/../` anywhere.
pub fn check_pathname(pathname: &str) -> Result<(), DispatchError> {
    if pathname == ".."
        || pathname.starts_with("../")
        || pathname.ends_with("/..")
        || pathname.contains("/../")
    {
        return Err(DispatchError::PathTraversal(pathname.to_string()));
    }
    Ok(())
}

/// Filenames get the same treatment: a "filename" could smuggle a partial
/// path.
pub fn check_filename(filename: &str) -> Result<(), DispatchError> {
    check_pathname(filename)
}

/// Last path segment of a transport path, with trailing separators ignored.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_tokens() {
        for bad in ["..", "../etc", "dir/..", "a/../b", "../", "x/../.."] {
            assert!(check_pathname(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn accepts_paths_without_traversal_tokens() {
        for good in [
            "/",
            "/docs/",
            "file.txt",
            "dir/file.txt",
            "..hidden",
            "a..b",
            "trailing../",
            "...",
        ] {
            assert!(check_pathname(good).is_ok(), "rejected {:?}", good);
        }
    }

    #[test]
    fn basename_takes_the_last_segment() {
        assert_eq!(basename("a/b/c.txt"), "c.txt");
        assert_eq!(basename("/docs/sub/"), "sub");
        assert_eq!(basename("plain.txt"), "plain.txt");
        assert_eq!(basename("nested/archive.zip"), "archive.zip");
    }
}
