//! Launch script generation for generated apps.

use super::escape::shell_quote;
use crate::config::{DesktopConfig, PathsConfig, StoreConfig};
use crate::error::{Result, WebToAppError};
use crate::naming::launcher_slug;
use crate::platform::set_executable;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Generator for per-app launch scripts.
pub struct LaunchScriptGenerator {
    /// Directory to store launch scripts.
    scripts_dir: PathBuf,
    /// Window host executed by webview launchers.
    window_bin: PathBuf,
}

impl LaunchScriptGenerator {
    /// Create a new launch script generator.
    ///
    /// # Arguments
    ///
    /// * `scripts_dir` - Directory to store generated scripts
    /// * `window_bin` - Window host binary for webview launchers
    pub fn new(scripts_dir: impl AsRef<Path>, window_bin: impl AsRef<Path>) -> Self {
        Self {
            scripts_dir: scripts_dir.as_ref().to_path_buf(),
            window_bin: window_bin.as_ref().to_path_buf(),
        }
    }

    /// Path of the launcher for an app name: `<slug>_launcher.sh`.
    pub fn script_path(&self, app_name: &str) -> PathBuf {
        self.scripts_dir.join(format!(
            "{}{}.{}",
            launcher_slug(app_name),
            PathsConfig::LAUNCHER_SUFFIX,
            PathsConfig::LAUNCHER_EXTENSION
        ))
    }

    /// Generate a launcher that opens `url` in the default browser.
    ///
    /// # Returns
    ///
    /// Path to the generated script.
    pub fn generate_browser(&self, app_name: &str, url: &str) -> Result<PathBuf> {
        let content = browser_script(app_name, url);
        self.write_script(app_name, &content)
    }

    /// Generate a launcher that opens `url` in the embedded window host.
    ///
    /// The host keeps its key-value store and log file in `storage_dir`.
    pub fn generate_webview(
        &self,
        app_name: &str,
        url: &str,
        storage_dir: &Path,
    ) -> Result<PathBuf> {
        let content = webview_script(app_name, url, storage_dir, &self.window_bin);
        self.write_script(app_name, &content)
    }

    fn write_script(&self, app_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.scripts_dir)
            .map_err(|e| WebToAppError::io_with_path(e, &self.scripts_dir))?;

        let script_path = self.script_path(app_name);
        fs::write(&script_path, content)
            .map_err(|e| WebToAppError::io_with_path(e, &script_path))?;
        set_executable(&script_path)?;

        debug!("Generated launch script at {:?}", script_path);
        Ok(script_path)
    }
}

fn browser_script(app_name: &str, url: &str) -> String {
    format!(
        r#"#!/bin/sh
# WebToApp browser launcher
APP_NAME={name}
URL={url}

exec {open} "$URL" >/dev/null 2>&1
"#,
        name = shell_quote(app_name),
        url = shell_quote(url),
        open = DesktopConfig::BROWSER_OPEN_COMMAND,
    )
}

fn webview_script(app_name: &str, url: &str, storage_dir: &Path, window_bin: &Path) -> String {
    format!(
        r#"#!/bin/sh
# WebToApp webview launcher
APP_NAME={name}
URL={url}
STORAGE_DIR={storage}
WINDOW_BIN={bin}

mkdir -p "$STORAGE_DIR"
exec "$WINDOW_BIN" --title "$APP_NAME" --url "$URL" --storage-dir "$STORAGE_DIR" \
    2>>"$STORAGE_DIR/{log}"
"#,
        name = shell_quote(app_name),
        url = shell_quote(url),
        storage = shell_quote(&storage_dir.to_string_lossy()),
        bin = shell_quote(&window_bin.to_string_lossy()),
        log = StoreConfig::LOG_FILENAME,
    )
}
