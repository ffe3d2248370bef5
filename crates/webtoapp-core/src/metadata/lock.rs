//! Advisory file locking around read-modify-write cycles.

use crate::{Result, WebToAppError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive advisory lock on a sibling lock file.
///
/// The lock is released when the guard is dropped.
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until an exclusive lock on `path` is held.
    ///
    /// The lock file is created if needed and never removed.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WebToAppError::io_with_path(e, parent))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| WebToAppError::io_with_path(e, path))?;

        file.lock_exclusive().map_err(|e| WebToAppError::Io {
            message: format!("Failed to lock {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;

        debug!("Acquired lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
