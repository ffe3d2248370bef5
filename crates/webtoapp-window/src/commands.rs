//! IPC surface exposed to page content.
//!
//! Pages send one JSON bridge request per call and get the bridge's
//! `{"success": ...}` response back unchanged.

use tauri::State;
use webtoapp_core::Bridge;

#[tauri::command]
pub fn bridge(request: String, state: State<'_, Bridge>) -> serde_json::Value {
    state.dispatch_json(&request)
}

/// Installed before page scripts run. Exposes `window.webtoapp` with one
/// promise-returning function per store operation.
pub const BRIDGE_SCRIPT: &str = r#"
(function () {
  if (window.webtoapp) return;
  var send = function (message) {
    return window.__TAURI_INTERNALS__.invoke('bridge', { request: JSON.stringify(message) });
  };
  window.webtoapp = Object.freeze({
    save_data: function (key, value) {
      return send({ cmd: 'save_data', key: key, value: value === undefined ? null : value });
    },
    get_data: function (key) { return send({ cmd: 'get_data', key: key }); },
    delete_data: function (key) { return send({ cmd: 'delete_data', key: key }); },
    list_all_data: function () { return send({ cmd: 'list_all_data' }); }
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use webtoapp_core::BridgeRequest;

    #[test]
    fn test_script_covers_every_request() {
        for request in [
            BridgeRequest::SaveData {
                key: String::new(),
                value: None,
            },
            BridgeRequest::GetData { key: String::new() },
            BridgeRequest::DeleteData { key: String::new() },
            BridgeRequest::ListAllData,
        ] {
            let message = format!("cmd: '{}'", request.command());
            assert!(BRIDGE_SCRIPT.contains(&message), "missing {}", message);
        }
    }
}
