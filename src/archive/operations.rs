//! Zip packing and unpacking
//!
//! Packs a file or directory subtree into a zip archive and extracts
//! archives into a destination directory. Directory trees are walked
//! through the storage abstraction so entry names get the same encoding
//! treatment as every other filesystem access; the recursive add mirrors
//! the recursive copy/delete in the storage layer and is the only other
//! place recursion is allowed.

use std::fs::File;
use std::io::Write;

use log::{debug, info};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::ArchiveError;
use crate::storage::validation::basename;
use crate::storage::{codec, filesystem};

/// Pack `source_path` into a new zip archive at `archive_path`.
///
/// A directory source is added recursively with entry paths rooted at the
/// directory's base name; every directory gets an explicit entry so empty
/// directories survive extraction. A file source becomes a single entry
/// named by its base name. Existence pre-conditions are the dispatcher's
/// job; failures here are soft.
pub fn create_archive(source_path: &str, archive_path: &str) -> Result<(), ArchiveError> {
    let file = File::create(codec::to_native(archive_path))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default();

    let source = source_path.trim_end_matches('/');
    if filesystem::is_directory(source) {
        add_directory(&mut writer, source, basename(source), options)?;
    } else {
        writer.start_file(basename(source), options)?;
        writer.write_all(&filesystem::read_file(source)?)?;
    }

    writer.finish()?;
    info!("Created archive {} from {}", archive_path, source_path);
    Ok(())
}

/// Recursively add a directory and its descendants to the archive under
/// `local_name`.
fn add_directory(
    writer: &mut ZipWriter<File>,
    dir: &str,
    local_name: &str,
    options: FileOptions,
) -> Result<(), ArchiveError> {
    writer.add_directory(local_name, options)?;
    for name in filesystem::list_directory(dir)? {
        if name == "." || name == ".." {
            continue;
        }
        let source = format!("{}/{}", dir, name);
        let dest = format!("{}/{}", local_name, name);
        if filesystem::is_directory(&source) {
            add_directory(writer, &source, &dest, options)?;
        } else {
            debug!("Adding {} as {}", source, dest);
            writer.start_file(&dest, options)?;
            writer.write_all(&filesystem::read_file(&source)?)?;
        }
    }
    Ok(())
}

/// Extract every entry of the archive under `destination_path`, recreating
/// the relative structure including empty directories. No partial cleanup
/// is attempted when extraction fails midway.
pub fn extract_archive(archive_path: &str, destination_path: &str) -> Result<(), ArchiveError> {
    let file = File::open(codec::to_native(archive_path))?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(codec::to_native(destination_path))?;
    info!(
        "Extracted archive {} into {}",
        archive_path, destination_path
    );
    Ok(())
}
