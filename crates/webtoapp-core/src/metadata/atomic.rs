//! Crash-safe JSON documents.
//!
//! A write lands in `<name>.<pid>.tmp`, is fsynced, then renamed over the
//! target, so readers see either the old or the new document. With
//! `keep_backup` the previous document is copied to `<name>.bak` first.

use crate::{Result, WebToAppError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};

const INDENT: &[u8] = b"    ";

/// Parse the JSON document at `path`; `Ok(None)` when it does not exist.
pub fn atomic_read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WebToAppError::io_with_path(e, path)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| WebToAppError::Json {
            message: format!("{} is not a valid document: {}", path.display(), e),
            source: Some(e),
        })
}

/// Replace the document at `path` with `data`, indented by four spaces.
pub fn atomic_write_json<T: Serialize>(path: &Path, data: &T, keep_backup: bool) -> Result<()> {
    let bytes = render(data)?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| WebToAppError::io_with_path(e, dir))?;
    }

    let staged = sibling(path, &format!("{}.tmp", process::id()));
    write_synced(&staged, &bytes)?;

    if keep_backup && path.is_file() {
        let backup = sibling(path, "bak");
        match fs::copy(path, &backup) {
            Ok(_) => debug!("Backed up {} to {}", path.display(), backup.display()),
            Err(e) => warn!("Could not back up {}: {}", path.display(), e),
        }
    }

    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        WebToAppError::io_with_path(e, path)
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

fn render<T: Serialize>(data: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut out,
        serde_json::ser::PrettyFormatter::with_indent(INDENT),
    );
    data.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| WebToAppError::io_with_path(e, path))?;
    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            WebToAppError::io_with_path(e, path)
        })
}

/// `<dir>/<file name>.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
