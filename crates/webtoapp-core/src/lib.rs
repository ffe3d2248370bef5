//! WebToApp Core - turn URLs into desktop-launchable apps.
//!
//! This crate holds everything except the console front end and the window
//! host process:
//! - [`registry`]: the JSON document of generated apps
//! - [`shortcut`]: launcher scripts and `.desktop` entries
//! - [`store`] and [`bridge`]: the per-app key-value store used by webview apps
//! - [`WebAppManager`]: create, list and delete, tying the pieces together
//!
//! # Example
//!
//! ```rust,ignore
//! use webtoapp_core::{AppContext, AppKind, CreateAppRequest, WebAppManager};
//!
//! fn main() -> webtoapp_core::Result<()> {
//!     let ctx = AppContext::for_current_user()?;
//!     ctx.ensure_directories()?;
//!     let manager = WebAppManager::new(ctx);
//!
//!     let created = manager.create_app(CreateAppRequest {
//!         name: "My Tool".into(),
//!         url: "example.com".into(),
//!         kind: AppKind::Oib,
//!         ..Default::default()
//!     })?;
//!     println!("Launcher: {}", created.record.launcher_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod platform;
pub mod registry;
pub mod shortcut;
pub mod store;

mod manager;

pub use bridge::{Bridge, BridgeEntry, BridgeRequest, BridgeResponse};
pub use context::AppContext;
pub use error::{Result, WebToAppError};
pub use manager::{CreateAppRequest, CreatedApp, DeleteOutcome, WebAppManager};
pub use registry::{AppKind, AppRecord, AppRegistry};
pub use store::{KeyValueRow, KeyValueStore};
