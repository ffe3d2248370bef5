//! Centralized configuration constants for WebToApp.
//!
//! Runtime paths live on [`crate::AppContext`]; this module only holds the
//! fixed names and defaults those paths are built from.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "WebToApp";
    pub const APP_DIR_NAME: &'static str = "webtoapp";
    pub const WINDOW_BIN_NAME: &'static str = "webtoapp-window";
    pub const WINDOW_BIN_ENV: &'static str = "WEBTOAPP_WINDOW_BIN";
}

/// Per-user directory and file names.
pub struct PathsConfig;

impl PathsConfig {
    pub const LAUNCHERS_DIR_NAME: &'static str = "launchers";
    pub const STORAGE_DIR_NAME: &'static str = "storage";
    pub const REGISTRY_FILENAME: &'static str = "apps.json";
    pub const REGISTRY_LOCK_FILENAME: &'static str = "apps.json.lock";
    pub const LAUNCHER_SUFFIX: &'static str = "_launcher";
    pub const LAUNCHER_EXTENSION: &'static str = "sh";
    pub const SHORTCUT_EXTENSION: &'static str = "desktop";
}

/// Per-app key-value store configuration.
pub struct StoreConfig;

impl StoreConfig {
    pub const DB_FILENAME: &'static str = "app_data.db";
    pub const LOG_FILENAME: &'static str = "webview.log";
    pub const BUSY_TIMEOUT_MS: u32 = 5000;
}

/// Embedded window defaults.
pub struct WindowConfig;

impl WindowConfig {
    pub const WIDTH: f64 = 1024.0;
    pub const HEIGHT: f64 = 768.0;
    pub const MIN_WIDTH: f64 = 400.0;
    pub const MIN_HEIGHT: f64 = 300.0;
    pub const RESIZABLE: bool = true;
    pub const CONFIRM_CLOSE: bool = true;
}

/// Desktop entry and desktop-environment integration.
pub struct DesktopConfig;

impl DesktopConfig {
    pub const ENTRY_VERSION: &'static str = "1.0";
    pub const CATEGORIES: &'static [&'static str] = &["Network", "WebApp"];
    pub const REFRESH_COMMAND: &'static str = "update-desktop-database";
    pub const SCRIPT_INTERPRETER: &'static str = "/bin/sh";
    pub const BROWSER_OPEN_COMMAND: &'static str = "xdg-open";
}
