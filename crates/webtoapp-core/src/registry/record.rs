//! Registry record types.

use crate::error::{Result, WebToAppError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How a generated app opens its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    /// Open in the default browser.
    Oib,
    /// Dedicated embedded window with local storage.
    #[default]
    Webview,
}

impl AppKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::Oib => "oib",
            AppKind::Webview => "webview",
        }
    }
}

impl FromStr for AppKind {
    type Err = WebToAppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "oib" => Ok(AppKind::Oib),
            "webview" => Ok(AppKind::Webview),
            other => Err(WebToAppError::validation(
                "type",
                format!("expected 'oib' or 'webview', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry entry.
///
/// Field names match the on-disk document: `type` for the kind, `launcher`
/// and `desktop` for the generated script and shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    pub url: String,
    /// Absolute icon path, or empty when none was given.
    #[serde(default)]
    pub icon: String,
    /// Entries written before the type existed are webview apps.
    #[serde(rename = "type", default)]
    pub kind: AppKind,
    #[serde(rename = "launcher")]
    pub launcher_path: PathBuf,
    #[serde(rename = "desktop")]
    pub shortcut_path: PathBuf,
    pub storage_dir: PathBuf,
}
