//! App registry: the JSON document recording every generated app.
//!
//! The registry maps an app's display name to its [`AppRecord`]. It is the
//! single source of truth for which launchers, shortcuts and storage
//! directories belong to WebToApp and may be deleted.
//!
//! # Location
//!
//! `~/.config/webtoapp/apps.json`, fully rewritten on every mutation.

mod app_registry;
mod record;

pub use app_registry::{AppRegistry, RegistryDocument};
pub use record::{AppKind, AppRecord};
