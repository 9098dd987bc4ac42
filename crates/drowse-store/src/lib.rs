//! Drowse Storage Layer
//!
//! Durable bookkeeping for the eviction engine: the state store
//! (per-resource idle clocks and user pins) and the settings registry,
//! each writing through to a pluggable backend so the process can be
//! killed at any instant and resume where it left off.
//!
//! ## Architecture
//!
//! - [`StateStore`] - record map with write-through persistence and
//!   reconcile-based garbage collection
//! - [`SettingsRegistry`] - last-write-wins settings merges, persisted on
//!   every update
//! - [`StateBackend`] / [`ConfigBackend`] - capability traits for the two
//!   durable stores; SQLite and TOML implementations for production,
//!   in-memory ones for tests and ephemeral runs

#![warn(missing_docs)]

mod backend;
mod config_file;
mod error;
mod memory;
mod settings;
mod sqlite;
mod state;

pub use backend::{ConfigBackend, StateBackend};
pub use config_file::TomlConfigBackend;
pub use error::StoreError;
pub use memory::{MemoryConfigBackend, MemoryStateBackend};
pub use settings::SettingsRegistry;
pub use sqlite::SqliteStateBackend;
pub use state::StateStore;
