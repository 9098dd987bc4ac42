//! The state store - durable per-resource bookkeeping
//!
//! Every resource the engine has seen gets one [`ResourceRecord`] here.
//! All mutations are written through to the backend before the call
//! returns, so the process can be terminated at any instant and lose
//! nothing beyond the in-flight call; on restart [`StateStore::open`]
//! rehydrates the full map before anything else runs.

use crate::{StateBackend, StoreError};
use drowse_domain::{Clock, ResourceId, ResourceRecord};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Durable per-resource bookkeeping, shared by the watcher, the sweeper,
/// and the control surface.
///
/// Mutations hold the map lock across the backend write so the durable
/// order matches the in-memory order; backend calls are short synchronous
/// statements.
pub struct StateStore {
    records: RwLock<HashMap<ResourceId, ResourceRecord>>,
    backend: Box<dyn StateBackend>,
    clock: Arc<dyn Clock>,
}

impl StateStore {
    /// Rehydrate a store from its backend.
    ///
    /// Unreadable durable state falls back to an empty store with a
    /// warning: losing bookkeeping degrades to re-learning idle clocks,
    /// which beats refusing to start.
    pub fn open(backend: impl StateBackend + 'static, clock: Arc<dyn Clock>) -> Self {
        let records: HashMap<ResourceId, ResourceRecord> = match backend.load() {
            Ok(records) => records.into_iter().collect(),
            Err(e) => {
                tracing::warn!("Unreadable runtime store, starting empty: {}", e);
                HashMap::new()
            }
        };
        tracing::debug!("Rehydrated {} resource records", records.len());
        Self {
            records: RwLock::new(records),
            backend: Box::new(backend),
            clock,
        }
    }

    /// Reset a resource's idle clock to now, creating the record if
    /// absent. An existing record keeps its pin.
    pub fn record_activity(&self, id: ResourceId) -> Result<(), StoreError> {
        let now_ms = self.clock.now_ms();
        let mut records = self.records.write().unwrap();
        let record = records
            .entry(id)
            .and_modify(|r| r.idle_since_ms = now_ms)
            .or_insert_with(|| ResourceRecord::fresh(now_ms));
        self.backend.put(id, record)
    }

    /// Start tracking a resource if it is not already tracked. An existing
    /// record keeps its idle clock, so rediscovering a resource after a
    /// restart never makes it look freshly used.
    ///
    /// Returns whether a record was created.
    pub fn ensure_tracked(&self, id: ResourceId) -> Result<bool, StoreError> {
        let mut records = self.records.write().unwrap();
        if records.contains_key(&id) {
            return Ok(false);
        }
        let record = ResourceRecord::fresh(self.clock.now_ms());
        records.insert(id, record);
        self.backend.put(id, &record)?;
        Ok(true)
    }

    /// Flip a resource's user pin, creating the record if absent.
    ///
    /// Returns the new protected state.
    pub fn toggle_protected(&self, id: ResourceId) -> Result<bool, StoreError> {
        let now_ms = self.clock.now_ms();
        let mut records = self.records.write().unwrap();
        let record = records
            .entry(id)
            .or_insert_with(|| ResourceRecord::fresh(now_ms));
        record.protected = !record.protected;
        let protected = record.protected;
        self.backend.put(id, record)?;
        Ok(protected)
    }

    /// Whether a resource is user-pinned. Unknown ids report false; the
    /// query never creates a record.
    pub fn is_protected(&self, id: ResourceId) -> bool {
        self.records
            .read()
            .unwrap()
            .get(&id)
            .map(|r| r.protected)
            .unwrap_or(false)
    }

    /// The record for one resource, if tracked
    pub fn get(&self, id: ResourceId) -> Option<ResourceRecord> {
        self.records.read().unwrap().get(&id).copied()
    }

    /// A point-in-time copy of every tracked record
    pub fn snapshot(&self) -> Vec<(ResourceId, ResourceRecord)> {
        self.records
            .read()
            .unwrap()
            .iter()
            .map(|(id, record)| (*id, *record))
            .collect()
    }

    /// Number of tracked records
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop one resource outright (closed by the host). The user pin goes
    /// with the record.
    ///
    /// Returns whether a record existed.
    pub fn remove(&self, id: ResourceId) -> Result<bool, StoreError> {
        let mut records = self.records.write().unwrap();
        if records.remove(&id).is_none() {
            return Ok(false);
        }
        self.backend.delete(&[id])?;
        Ok(true)
    }

    /// Delete every record whose id is not in `live`, returning the
    /// removed ids. After this pass the tracked set is exactly the
    /// intersection of `live` and the previously tracked ids.
    pub fn reconcile(&self, live: &HashSet<ResourceId>) -> Result<Vec<ResourceId>, StoreError> {
        let mut records = self.records.write().unwrap();
        let stale: Vec<ResourceId> = records
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in &stale {
            records.remove(id);
        }
        if !stale.is_empty() {
            self.backend.delete(&stale)?;
        }
        Ok(stale)
    }

    /// Checkpoint the backend. Mutations are written through as they
    /// happen; this closes a sweep by pushing anything the backend
    /// buffers.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.backend.flush()
    }
}
