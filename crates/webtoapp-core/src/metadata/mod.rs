//! JSON document persistence.
//!
//! This module provides:
//! - Atomic JSON file reads and writes
//! - An advisory lock guard for read-modify-write cycles

mod atomic;
mod lock;

pub use atomic::{atomic_read_json, atomic_write_json};
pub use lock::FileLock;
