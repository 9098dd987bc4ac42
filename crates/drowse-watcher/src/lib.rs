//! Drowse Resource Watcher
//!
//! Translates host lifecycle signals (created, activated, updated,
//! removed) into state-store updates, and performs the startup
//! enumeration that lets a relaunched process resume with its
//! previously-known idle clocks instead of starting cold.

#![warn(missing_docs)]

mod error;
mod watcher;

pub use error::WatchError;
pub use watcher::ResourceWatcher;
