//! Per-app local key-value storage.
//!
//! Each webview app owns one SQLite file inside its storage directory. Writes
//! append rows; reads return the newest row for a key.

mod sqlite;

pub use sqlite::{KeyValueRow, KeyValueStore};
