//! Per-user path layout.
//!
//! Every function takes the home directory explicitly so the whole layout can
//! be relocated (tests, `--home`).
//!
//! - config: `~/.config/webtoapp` (registry, launchers)
//! - applications: `~/.local/share/applications`
//! - storage: `~/.local/share/webtoapp/storage`

use crate::config::{AppConfig, PathsConfig};
use crate::error::{Result, WebToAppError};
use std::path::{Path, PathBuf};

/// Get the current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| WebToAppError::Config {
        message: "Could not determine home directory".to_string(),
    })
}

/// WebToApp configuration directory (`{home}/.config/webtoapp`).
pub fn config_dir(home: &Path) -> PathBuf {
    home.join(".config").join(AppConfig::APP_DIR_NAME)
}

/// XDG applications directory (`{home}/.local/share/applications`).
pub fn apps_dir(home: &Path) -> PathBuf {
    home.join(".local").join("share").join("applications")
}

/// Root of the per-app storage directories (`{home}/.local/share/webtoapp/storage`).
pub fn storage_root(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join(AppConfig::APP_DIR_NAME)
        .join(PathsConfig::STORAGE_DIR_NAME)
}

/// Default location of the window host binary: next to the running executable.
///
/// Falls back to the bare binary name so `PATH` lookup applies at launch time.
pub fn default_window_bin() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(AppConfig::WINDOW_BIN_NAME)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(AppConfig::WINDOW_BIN_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_home() {
        let home = PathBuf::from("/home/alice");

        assert_eq!(config_dir(&home), PathBuf::from("/home/alice/.config/webtoapp"));
        assert_eq!(
            apps_dir(&home),
            PathBuf::from("/home/alice/.local/share/applications")
        );
        assert_eq!(
            storage_root(&home),
            PathBuf::from("/home/alice/.local/share/webtoapp/storage")
        );
    }

    #[test]
    fn test_default_window_bin_names_host() {
        let bin = default_window_bin();
        assert!(bin.ends_with(AppConfig::WINDOW_BIN_NAME));
    }
}
