//! Request/response bridge between embedded page content and the key-value store.
//!
//! Requests and responses are plain JSON so the window host can pass them
//! through its IPC layer unchanged:
//!
//! ```json
//! {"cmd": "save_data", "key": "theme", "value": "dark"}
//! {"success": true}
//!
//! {"cmd": "get_data", "key": "theme"}
//! {"success": true, "value": "dark"}
//!
//! {"cmd": "list_all_data"}
//! {"success": true, "data": [{"key": "theme", "value": "dark", "created_at": "..."}]}
//!
//! {"success": false, "error": "Database error: ..."}
//! ```

use crate::store::{KeyValueRow, KeyValueStore};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::error;

/// A single bridge call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeRequest {
    SaveData {
        key: String,
        #[serde(default)]
        value: Option<String>,
    },
    GetData {
        key: String,
    },
    DeleteData {
        key: String,
    },
    ListAllData,
}

impl BridgeRequest {
    pub fn command(&self) -> &'static str {
        match self {
            BridgeRequest::SaveData { .. } => "save_data",
            BridgeRequest::GetData { .. } => "get_data",
            BridgeRequest::DeleteData { .. } => "delete_data",
            BridgeRequest::ListAllData => "list_all_data",
        }
    }
}

/// Row shape exposed to page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeEntry {
    pub key: String,
    pub value: Option<String>,
    pub created_at: String,
}

impl From<KeyValueRow> for BridgeEntry {
    fn from(row: KeyValueRow) -> Self {
        Self {
            key: row.key,
            value: row.value,
            created_at: row.created_at,
        }
    }
}

/// Outcome of a bridge call.
///
/// Serializes to `{"success": true, ...}` or `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeResponse {
    Saved,
    Value(Option<String>),
    Deleted,
    Data(Vec<BridgeEntry>),
    Failed(String),
}

impl BridgeResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, BridgeResponse::Failed(_))
    }
}

impl Serialize for BridgeResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("success", &self.is_success())?;
        match self {
            BridgeResponse::Saved | BridgeResponse::Deleted => {}
            BridgeResponse::Value(value) => map.serialize_entry("value", value)?,
            BridgeResponse::Data(data) => map.serialize_entry("data", data)?,
            BridgeResponse::Failed(error) => map.serialize_entry("error", error)?,
        }
        map.end()
    }
}

/// Dispatches bridge requests against one app's store.
#[derive(Debug, Clone)]
pub struct Bridge {
    store: KeyValueStore,
}

impl Bridge {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Run one request. Store failures are logged and reported in the response.
    pub fn dispatch(&self, request: BridgeRequest) -> BridgeResponse {
        let command = request.command();
        let result = match request {
            BridgeRequest::SaveData { key, value } => self
                .store
                .save(&key, value.as_deref())
                .map(|_| BridgeResponse::Saved),
            BridgeRequest::GetData { key } => self.store.get(&key).map(BridgeResponse::Value),
            BridgeRequest::DeleteData { key } => {
                self.store.delete(&key).map(|_| BridgeResponse::Deleted)
            }
            BridgeRequest::ListAllData => self.store.list_all().map(|rows| {
                BridgeResponse::Data(rows.into_iter().map(BridgeEntry::from).collect())
            }),
        };

        result.unwrap_or_else(|e| {
            error!("Error in {}: {}", command, e);
            BridgeResponse::Failed(e.to_string())
        })
    }

    /// Parse a raw JSON request, dispatch it, and return the JSON response.
    pub fn dispatch_json(&self, raw: &str) -> serde_json::Value {
        let response = match serde_json::from_str::<BridgeRequest>(raw) {
            Ok(request) => self.dispatch(request),
            Err(e) => {
                error!("Malformed bridge request: {}", e);
                BridgeResponse::Failed(format!("malformed request: {}", e))
            }
        };
        serde_json::to_value(&response).unwrap_or_else(|e| {
            serde_json::json!({ "success": false, "error": e.to_string() })
        })
    }
}
