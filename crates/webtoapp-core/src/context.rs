//! Explicit runtime context: every directory and external program WebToApp touches.

use crate::config::{DesktopConfig, PathsConfig};
use crate::error::{Result, WebToAppError};
use crate::platform::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Paths and programs used by the app manager.
///
/// Built once at startup and passed to each component.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// `~/.config/webtoapp`
    pub config_dir: PathBuf,
    /// Generated launcher scripts.
    pub launchers_dir: PathBuf,
    /// XDG applications directory for `.desktop` files.
    pub apps_dir: PathBuf,
    /// Parent of every per-app storage directory.
    pub storage_root: PathBuf,
    /// Registry document.
    pub registry_path: PathBuf,
    /// Interpreter named in shortcut `Exec` lines.
    pub interpreter: PathBuf,
    /// Window host started by webview launchers.
    pub window_bin: PathBuf,
    /// Application index refresh command; `None` disables the refresh.
    pub refresh_command: Option<String>,
}

impl AppContext {
    /// Context for the current user's home directory.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::with_home(paths::home_dir()?))
    }

    /// Context with every per-user path rooted at `home`.
    pub fn with_home(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref();
        let config_dir = paths::config_dir(home);

        Self {
            launchers_dir: config_dir.join(PathsConfig::LAUNCHERS_DIR_NAME),
            registry_path: config_dir.join(PathsConfig::REGISTRY_FILENAME),
            apps_dir: paths::apps_dir(home),
            storage_root: paths::storage_root(home),
            interpreter: PathBuf::from(DesktopConfig::SCRIPT_INTERPRETER),
            window_bin: paths::default_window_bin(),
            refresh_command: Some(DesktopConfig::REFRESH_COMMAND.to_string()),
            config_dir,
        }
    }

    /// Override the window host binary.
    pub fn with_window_bin(mut self, window_bin: impl Into<PathBuf>) -> Self {
        self.window_bin = window_bin.into();
        self
    }

    /// Override (or disable with `None`) the application index refresh.
    pub fn with_refresh_command(mut self, command: Option<String>) -> Self {
        self.refresh_command = command;
        self
    }

    /// Lock file guarding registry read-modify-write cycles.
    pub fn registry_lock_path(&self) -> PathBuf {
        self.config_dir.join(PathsConfig::REGISTRY_LOCK_FILENAME)
    }

    /// Create every directory WebToApp writes into.
    ///
    /// Failure here is fatal for the console front end.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.config_dir,
            &self.apps_dir,
            &self.storage_root,
            &self.launchers_dir,
        ] {
            fs::create_dir_all(dir).map_err(|e| WebToAppError::io_with_path(e, dir))?;
            debug!("Ensured directory {}", dir.display());
        }
        Ok(())
    }
}
