//! Capability traits for the two durable stores
//!
//! The stores depend only on these interfaces; substituting the in-memory
//! implementations makes the whole engine hermetic for tests.

use crate::StoreError;
use drowse_domain::{ResourceId, ResourceRecord, Settings};
use std::sync::Arc;

/// Durable backing for the state store (the local, fast runtime store).
///
/// Writes are synchronous and per-record atomic; `flush` is a checkpoint
/// for implementations that buffer.
pub trait StateBackend: Send + Sync {
    /// Load every persisted record
    fn load(&self) -> Result<Vec<(ResourceId, ResourceRecord)>, StoreError>;

    /// Insert or replace one record
    fn put(&self, id: ResourceId, record: &ResourceRecord) -> Result<(), StoreError>;

    /// Delete the given records; missing ids are not an error
    fn delete(&self, ids: &[ResourceId]) -> Result<(), StoreError>;

    /// Checkpoint buffered writes, if any
    fn flush(&self) -> Result<(), StoreError>;
}

/// Durable backing for the settings registry (the slow, user-synced
/// configuration store).
pub trait ConfigBackend: Send + Sync {
    /// Load persisted settings; `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<Settings>, StoreError>;

    /// Persist the full settings value
    fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

impl<B: StateBackend + ?Sized> StateBackend for Arc<B> {
    fn load(&self) -> Result<Vec<(ResourceId, ResourceRecord)>, StoreError> {
        (**self).load()
    }

    fn put(&self, id: ResourceId, record: &ResourceRecord) -> Result<(), StoreError> {
        (**self).put(id, record)
    }

    fn delete(&self, ids: &[ResourceId]) -> Result<(), StoreError> {
        (**self).delete(ids)
    }

    fn flush(&self) -> Result<(), StoreError> {
        (**self).flush()
    }
}

impl<B: ConfigBackend + ?Sized> ConfigBackend for Arc<B> {
    fn load(&self) -> Result<Option<Settings>, StoreError> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        (**self).save(settings)
    }
}
