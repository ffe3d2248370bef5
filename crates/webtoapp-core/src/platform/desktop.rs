//! Desktop-environment integration.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Ask the desktop environment to re-read the applications directory.
///
/// Best effort: a missing command or a non-zero exit is logged at debug level
/// and otherwise ignored.
pub fn refresh_app_index(command: &str, apps_dir: &Path) {
    let status = Command::new(command)
        .arg(apps_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {
            debug!("Refreshed application index for {}", apps_dir.display())
        }
        Ok(status) => debug!("{} exited with {}", command, status),
        Err(e) => debug!("Could not run {}: {}", command, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_refresh_command_is_ignored() {
        refresh_app_index("webtoapp-no-such-command", Path::new("/tmp"));
    }
}
