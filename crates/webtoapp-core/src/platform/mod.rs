//! Platform abstraction layer.
//!
//! All OS-specific behavior lives here:
//! - `paths` - Per-user directory layout
//! - `permissions` - Executable bits on generated files
//! - `desktop` - Desktop-environment integration (application index refresh)
//!
//! Only Linux-style desktops (XDG `.desktop` files) are supported.

pub mod desktop;
pub mod paths;
pub mod permissions;

pub use desktop::refresh_app_index;
pub use paths::{apps_dir, config_dir, home_dir, storage_root};
pub use permissions::{is_executable, set_executable};
