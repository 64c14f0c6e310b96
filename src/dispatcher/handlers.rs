//! Action handlers
//!
//! Maps a resolved action to its filesystem operation and serializes the
//! outcome. Hard validation failures propagate with `?`; soft storage
//! failures are caught here and rendered as the JSON failure shape.
//!
//! Paths are built by concatenation exactly as the widget expects: the
//! configured root, the `dir` parameter (with its surrounding slashes), and
//! the entry name.

use std::time::SystemTime;

use base64::Engine as _;
use base64::engine::general_purpose;
use chrono::{DateTime, Local};
use log::info;
use sha2::{Digest, Sha256};

use crate::archive;
use crate::dispatcher::actions::Action;
use crate::dispatcher::request::FileRequest;
use crate::dispatcher::responses::{DirectoryListing, GsResponse, Item};
use crate::error::DispatchError;
use crate::server::config::ServerConfig;
use crate::storage::validation::{basename, check_filename, check_pathname};
use crate::storage::{filesystem, listing};
use crate::upload::{self, UploadOutcome};

/// Process one request against the active root.
///
/// Pre-conditions checked before any handler runs: a configured root, a
/// present and traversal-free `dir`, and a recognized action code (missing
/// `opt` defaults to the directory listing).
pub fn dispatch(config: &ServerConfig, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let root = config
        .active_root()
        .ok_or_else(|| DispatchError::Configuration("root can not be null".to_string()))?;

    let dir = match request.dir.as_deref() {
        Some(dir) if !dir.is_empty() => dir,
        _ => return Err(DispatchError::MissingParameter("dir")),
    };
    check_pathname(dir)?;

    let action = match request.opt.as_deref() {
        None => Action::ListDir,
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .and_then(Action::from_code)
            .ok_or_else(|| DispatchError::UnknownAction(raw.to_string()))?,
    };

    match action {
        Action::ListDir => handle_list(root, dir),
        Action::MakeFile => handle_make_file(root, dir, request),
        Action::MakeDirectory => handle_make_directory(root, dir, request),
        Action::DeleteItems => handle_delete_items(root, dir, request),
        Action::CopyItems => handle_copy_items(root, dir, request),
        Action::RenameItem => handle_rename(root, dir, request),
        Action::MoveItems => handle_move_items(root, dir, request),
        Action::DownloadItem => handle_download(root, dir, request),
        Action::ReadFile => handle_read(root, dir, request),
        Action::WriteFile => handle_write(root, dir, request),
        Action::UploadFiles => handle_upload_files(config, root, dir, request),
        Action::CopyAsFile => handle_copy_as(root, dir, request),
        Action::ZipItems => handle_zip(root, dir, request),
        Action::UnzipItems => handle_unzip(root, dir, request),
    }
}

fn require_filename(request: &FileRequest) -> Result<&str, DispatchError> {
    request
        .filename
        .as_deref()
        .ok_or(DispatchError::MissingParameter("filename"))
}

fn require_new_filename(request: &FileRequest) -> Result<&str, DispatchError> {
    request
        .new_filename
        .as_deref()
        .ok_or(DispatchError::MissingParameter("newfilename"))
}

fn require_files(request: &FileRequest) -> Result<&[String], DispatchError> {
    match request.files.as_deref() {
        Some(files) if !files.is_empty() => Ok(files),
        _ => Err(DispatchError::MissingParameter("files")),
    }
}

fn format_timestamp(time: Option<SystemTime>) -> String {
    let time = time.unwrap_or(SystemTime::UNIX_EPOCH);
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn handle_list(root: &str, dir: &str) -> Result<GsResponse, DispatchError> {
    let path = format!("{}{}", root, dir);
    if !filesystem::exists(&path) {
        return Err(DispatchError::SourceNotFound(dir.to_string()));
    }

    let mut names = match filesystem::list_directory(&path) {
        Ok(names) => names,
        Err(e) => return Ok(GsResponse::failure(format!("Can not list {}: {}", dir, e))),
    };
    names.sort_by(|a, b| listing::natural_cmp(a, b));

    let mut result = DirectoryListing::default();
    for name in names {
        if name == "." || name == ".." {
            continue;
        }
        let full = format!("{}{}{}", root, dir, name);
        let rel = format!("{}{}", dir, name);
        let id = hex::encode(Sha256::digest(rel.as_bytes()));
        let last_mod = format_timestamp(filesystem::modified_time(&full));
        if filesystem::is_directory(&full) {
            result.gsdirs.push(Item {
                name,
                path: rel,
                id,
                last_mod,
                kind: "dir",
                extension: String::new(),
                size: 0,
            });
        } else {
            let extension = listing::file_extension(&name);
            let size = filesystem::file_size(&full);
            result.gsfiles.push(Item {
                name,
                path: rel,
                id,
                last_mod,
                kind: "file",
                extension,
                size,
            });
        }
    }

    info!(
        "Listed {} ({} dirs, {} files)",
        dir,
        result.gsdirs.len(),
        result.gsfiles.len()
    );
    Ok(GsResponse::Listing(result))
}

fn handle_make_file(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    check_filename(filename)?;
    let path = format!("{}{}{}", root, dir, filename);
    if filesystem::exists(&path) {
        return Err(DispatchError::DestinationExists(format!("{}{}", dir, filename)));
    }
    match filesystem::create_file(&path) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::failure(format!("Can not create {}{}", dir, filename))),
    }
}

fn handle_make_directory(
    root: &str,
    dir: &str,
    request: &FileRequest,
) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    check_filename(filename)?;
    let path = format!("{}{}{}", root, dir, filename);
    // an already-existing directory counts as done
    if filesystem::exists(&path) {
        return Ok(GsResponse::Success);
    }
    match filesystem::create_directory(&path) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::Failure(None)),
    }
}

fn handle_delete_items(
    root: &str,
    dir: &str,
    request: &FileRequest,
) -> Result<GsResponse, DispatchError> {
    let files = require_files(request)?;
    for name in files {
        let rel = format!("{}{}", dir, name);
        check_pathname(&rel)?;
        let full = format!("{}{}", root, rel);
        if !filesystem::exists(&full) {
            return Err(DispatchError::SourceNotFound(rel));
        }
        let outcome = if filesystem::is_directory(&full) {
            filesystem::delete_directory_recursive(&full)
        } else {
            filesystem::delete_file(&full)
        };
        if outcome.is_err() {
            return Ok(GsResponse::Failure(None));
        }
    }
    Ok(GsResponse::Success)
}

fn handle_copy_items(
    root: &str,
    dir: &str,
    request: &FileRequest,
) -> Result<GsResponse, DispatchError> {
    let files = require_files(request)?;
    for name in files {
        check_pathname(name)?;
        let src = format!("{}{}", root, name);
        let dest = format!("{}{}{}", root, dir, basename(name));
        if !filesystem::exists(&src) {
            return Err(DispatchError::SourceNotFound(name.clone()));
        }
        if filesystem::exists(&dest) {
            return Err(DispatchError::DestinationExists(name.clone()));
        }
        let outcome = if filesystem::is_directory(&src) {
            filesystem::copy_directory_recursive(&src, &dest)
        } else {
            filesystem::copy_file(&src, &dest)
        };
        if outcome.is_err() {
            return Ok(GsResponse::Failure(None));
        }
    }
    Ok(GsResponse::Success)
}

fn handle_move_items(
    root: &str,
    dir: &str,
    request: &FileRequest,
) -> Result<GsResponse, DispatchError> {
    let files = require_files(request)?;
    for name in files {
        check_pathname(name)?;
        let src = format!("{}{}", root, name);
        let dest = format!("{}{}{}", root, dir, basename(name));
        if !filesystem::exists(&src) {
            return Err(DispatchError::SourceNotFound(name.clone()));
        }
        if filesystem::exists(&dest) {
            return Err(DispatchError::DestinationExists(name.clone()));
        }
        if filesystem::rename(&src, &dest).is_err() {
            return Ok(GsResponse::Failure(None));
        }
    }
    Ok(GsResponse::Success)
}

fn handle_rename(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    let new_filename = require_new_filename(request)?;
    check_filename(filename)?;
    check_filename(new_filename)?;

    let src = format!("{}{}{}", root, dir, basename(filename));
    let dest = format!("{}{}{}", root, dir, basename(new_filename));
    if !filesystem::exists(&src) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    if filesystem::exists(&dest) {
        return Err(DispatchError::DestinationExists(format!(
            "{}{}",
            dir, new_filename
        )));
    }
    match filesystem::rename(&src, &dest) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::failure(format!(
            "Can not rename {}{} to {}{}",
            dir, filename, dir, new_filename
        ))),
    }
}

fn handle_download(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    check_filename(filename)?;
    let path = format!("{}{}{}", root, dir, filename);
    if !filesystem::exists(&path) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    match filesystem::read_file(&path) {
        Ok(body) => Ok(GsResponse::Download {
            filename: basename(filename).to_string(),
            body,
        }),
        Err(e) => Ok(GsResponse::failure(format!(
            "Can not read {}{}: {}",
            dir, filename, e
        ))),
    }
}

fn handle_read(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    check_filename(filename)?;
    let path = format!("{}{}{}", root, dir, filename);
    if !filesystem::exists(&path) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    match filesystem::read_file(&path) {
        Ok(data) => {
            if request.base64_encode {
                let encoded = general_purpose::STANDARD.encode(&data);
                Ok(GsResponse::Content {
                    body: encoded.into_bytes(),
                    text: true,
                })
            } else {
                Ok(GsResponse::Content {
                    body: data,
                    text: false,
                })
            }
        }
        Err(e) => Ok(GsResponse::failure(format!(
            "Can not read {}{}: {}",
            dir, filename, e
        ))),
    }
}

fn handle_write(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    check_filename(filename)?;
    let content = request.file_content.as_deref().unwrap_or("");
    let path = format!("{}{}{}", root, dir, filename);
    // write only updates existing files; creation is its own action
    if !filesystem::exists(&path) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    match filesystem::write_file(&path, content.as_bytes()) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::failure(format!("Can not write {}{}", dir, filename))),
    }
}

fn handle_upload_files(
    config: &ServerConfig,
    root: &str,
    dir: &str,
    request: &FileRequest,
) -> Result<GsResponse, DispatchError> {
    match upload::handle_upload(root, dir, &request.uploads, config.max_upload_size_kb)? {
        UploadOutcome::Saved => Ok(GsResponse::Success),
        UploadOutcome::Failed(_) => Ok(GsResponse::Failure(None)),
    }
}

fn handle_copy_as(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    let new_filename = require_new_filename(request)?;
    check_filename(filename)?;
    check_filename(new_filename)?;

    let src = format!("{}{}{}", root, dir, filename);
    let dest = format!("{}{}{}", root, dir, new_filename);
    if !filesystem::exists(&src) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    if filesystem::exists(&dest) {
        return Err(DispatchError::DestinationExists(format!(
            "{}{}",
            dir, new_filename
        )));
    }
    match filesystem::copy_file(&src, &dest) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::failure(format!(
            "Can not copy {}{}",
            dir, new_filename
        ))),
    }
}

fn handle_zip(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    let new_filename = require_new_filename(request)?;
    check_filename(filename)?;
    check_filename(new_filename)?;

    let src = format!("{}{}{}", root, dir, filename);
    let dest = format!("{}{}{}", root, dir, new_filename);
    if !filesystem::exists(&src) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    if filesystem::exists(&dest) {
        return Err(DispatchError::DestinationExists(format!(
            "{}{}",
            dir, new_filename
        )));
    }
    match archive::create_archive(&src, &dest) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::Failure(None)),
    }
}

fn handle_unzip(root: &str, dir: &str, request: &FileRequest) -> Result<GsResponse, DispatchError> {
    let filename = require_filename(request)?;
    let new_filename = require_new_filename(request)?;
    check_filename(filename)?;
    check_filename(new_filename)?;

    let src = format!("{}{}{}", root, dir, filename);
    if !filesystem::exists(&src) {
        return Err(DispatchError::SourceNotFound(format!("{}{}", dir, filename)));
    }
    if filesystem::exists(&format!("{}{}{}", root, dir, new_filename)) {
        return Err(DispatchError::DestinationExists(format!(
            "{}{}",
            dir, new_filename
        )));
    }
    // the new name is reduced to its base name so it cannot itself carry a
    // path
    let dest = format!("{}{}{}", root, dir, basename(new_filename));
    match archive::extract_archive(&src, &dest) {
        Ok(()) => Ok(GsResponse::Success),
        Err(_) => Ok(GsResponse::Failure(None)),
    }
}
