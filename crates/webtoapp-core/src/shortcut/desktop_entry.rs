//! freedesktop `.desktop` launcher entries.
//!
//! Only the `Application` keys WebToApp writes are modelled. Every string
//! value goes through [`escape_desktop_value`] and every `Exec` argument
//! through [`quote_exec_arg`], so a name cannot smuggle in extra keys.

use super::escape::{escape_desktop_value, quote_exec_arg};
use crate::config::DesktopConfig;
use crate::error::{Result, WebToAppError};
use crate::platform::set_executable;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    /// Program followed by its arguments.
    pub exec: Vec<String>,
    pub comment: Option<String>,
    /// Icon path or theme name; empty lets the desktop pick its default.
    pub icon: String,
    pub categories: Vec<String>,
    pub terminal: bool,
    pub startup_notify: bool,
}

impl DesktopEntry {
    /// Entry named `name` that runs `exec`, with the WebToApp categories.
    pub fn new<I, S>(name: impl Into<String>, exec: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            exec: exec.into_iter().map(Into::into).collect(),
            comment: None,
            icon: String::new(),
            categories: DesktopConfig::CATEGORIES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            terminal: false,
            startup_notify: true,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// `Exec` value with each argument quoted, before value escaping.
    pub fn exec_line(&self) -> String {
        let quoted: Vec<String> = self.exec.iter().map(|arg| quote_exec_arg(arg)).collect();
        quoted.join(" ")
    }

    /// Write the entry to `path` (mode 0755, parents created).
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| WebToAppError::io_with_path(e, dir))?;
        }
        fs::write(path, self.to_string()).map_err(|e| WebToAppError::io_with_path(e, path))?;
        set_executable(path)?;

        debug!("Wrote desktop entry {}", path.display());
        Ok(())
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories: String = self.categories.iter().map(|c| format!("{};", c)).collect();

        f.write_str("[Desktop Entry]\n")?;
        writeln!(f, "Version={}", DesktopConfig::ENTRY_VERSION)?;
        writeln!(f, "Name={}", escape_desktop_value(&self.name))?;
        writeln!(f, "Exec={}", escape_desktop_value(&self.exec_line()))?;
        writeln!(f, "Icon={}", escape_desktop_value(&self.icon))?;
        f.write_str("Type=Application\n")?;
        if !categories.is_empty() {
            writeln!(f, "Categories={}", categories)?;
        }
        if let Some(comment) = &self.comment {
            writeln!(f, "Comment={}", escape_desktop_value(comment))?;
        }
        writeln!(f, "Terminal={}", self.terminal)?;
        writeln!(f, "StartupNotify={}", self.startup_notify)
    }
}
