//! Executable bits for generated scripts and shortcuts.

use crate::error::{Result, WebToAppError};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const EXECUTABLE_MODE: u32 = 0o755;
const OWNER_EXECUTE: u32 = 0o100;

/// `chmod 0755 path`.
pub fn set_executable(path: &Path) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
        .map_err(|e| WebToAppError::io_with_path(e, path))
}

/// Whether the owner execute bit is set. Missing files are not executable.
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & OWNER_EXECUTE != 0)
        .unwrap_or(false)
}
