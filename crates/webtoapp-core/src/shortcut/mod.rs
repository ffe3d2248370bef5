//! Launcher script and desktop shortcut generation.
//!
//! Provides:
//! - Browser launchers (`xdg-open` on the app URL)
//! - Webview launchers (exec the window host with the app's storage directory)
//! - `.desktop` entries in `~/.local/share/applications` pointing at a launcher
//!
//! Every value interpolated into a script or desktop entry goes through the
//! quoting helpers in `escape`.

mod desktop_entry;
mod escape;
mod launch_script;

pub use desktop_entry::DesktopEntry;
pub use escape::{escape_desktop_value, quote_exec_arg, shell_quote};
pub use launch_script::LaunchScriptGenerator;
