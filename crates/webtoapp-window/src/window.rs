//! Main window construction and close confirmation.

use crate::commands::BRIDGE_SCRIPT;
use tauri::ipc::CapabilityBuilder;
use tauri::{App, Manager, WebviewUrl, WebviewWindowBuilder, Window, WindowEvent};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tracing::{debug, error, info};
use url::Url;
use webtoapp_core::config::WindowConfig;

pub const MAIN_WINDOW_LABEL: &str = "main";
const CAPABILITY_ID: &str = "page-bridge";

/// URL pattern granting IPC access to every page on the app's origin.
pub fn remote_pattern(url: &Url) -> String {
    format!("{}/*", url.origin().ascii_serialization())
}

/// Open the app window on `url` with the bridge script installed.
pub fn open_main_window(app: &mut App, title: &str, url: Url) -> tauri::Result<()> {
    let pattern = remote_pattern(&url);
    debug!("Granting bridge access to {}", pattern);
    app.add_capability(
        CapabilityBuilder::new(CAPABILITY_ID)
            .remote(pattern)
            .window(MAIN_WINDOW_LABEL)
            .permission("core:default"),
    )?;

    WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url.clone()))
        .title(title)
        .inner_size(WindowConfig::WIDTH, WindowConfig::HEIGHT)
        .min_inner_size(WindowConfig::MIN_WIDTH, WindowConfig::MIN_HEIGHT)
        .resizable(WindowConfig::RESIZABLE)
        .initialization_script(BRIDGE_SCRIPT)
        .build()?;

    info!("Opened window {:?} at {}", title, url);
    Ok(())
}

/// Ask before closing; the window is destroyed only when the user confirms.
pub fn confirm_close(window: &Window, event: &WindowEvent) {
    if !WindowConfig::CONFIRM_CLOSE {
        return;
    }
    let WindowEvent::CloseRequested { api, .. } = event else {
        return;
    };
    api.prevent_close();

    let target = window.clone();
    window
        .dialog()
        .message("Are you sure you want to close this window?")
        .title(window.title().unwrap_or_default())
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .show(move |confirmed| {
            if confirmed {
                debug!("Close confirmed");
                if let Err(e) = target.destroy() {
                    error!("Failed to close window: {}", e);
                    target.app_handle().exit(1);
                }
            }
        });
}
