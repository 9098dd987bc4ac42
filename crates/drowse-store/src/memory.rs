//! In-memory backends for tests and ephemeral runs

use crate::{ConfigBackend, StateBackend, StoreError};
use drowse_domain::{ResourceId, ResourceRecord, Settings};
use std::collections::HashMap;
use std::sync::RwLock;

/// State backend held entirely in memory.
///
/// Nothing survives the process, which is what tests and ephemeral
/// (no-persistence) deployments want. Share one behind an `Arc` to
/// simulate a restart: open a second store over the same backend.
#[derive(Debug, Default)]
pub struct MemoryStateBackend {
    records: RwLock<HashMap<ResourceId, ResourceRecord>>,
}

impl MemoryStateBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with records, as if a previous process had
    /// persisted them
    pub fn seeded(records: impl IntoIterator<Item = (ResourceId, ResourceRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Number of persisted records
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the backend holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The persisted record for `id`, if any
    pub fn get(&self, id: ResourceId) -> Option<ResourceRecord> {
        self.records.read().unwrap().get(&id).copied()
    }
}

impl StateBackend for MemoryStateBackend {
    fn load(&self) -> Result<Vec<(ResourceId, ResourceRecord)>, StoreError> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .map(|(id, record)| (*id, *record))
            .collect())
    }

    fn put(&self, id: ResourceId, record: &ResourceRecord) -> Result<(), StoreError> {
        self.records.write().unwrap().insert(id, *record);
        Ok(())
    }

    fn delete(&self, ids: &[ResourceId]) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();
        for id in ids {
            records.remove(id);
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Config backend held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryConfigBackend {
    settings: RwLock<Option<Settings>>,
}

impl MemoryConfigBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with settings, as if previously saved
    pub fn seeded(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }

    /// The persisted settings, if any
    pub fn saved(&self) -> Option<Settings> {
        self.settings.read().unwrap().clone()
    }
}

impl ConfigBackend for MemoryConfigBackend {
    fn load(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.settings.read().unwrap().clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.write().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_backend_roundtrip() {
        let backend = MemoryStateBackend::new();
        let id = ResourceId::from_value(1);
        let record = ResourceRecord::fresh(500);

        backend.put(id, &record).unwrap();
        assert_eq!(backend.load().unwrap(), vec![(id, record)]);

        backend.delete(&[id]).unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn delete_tolerates_missing_ids() {
        let backend = MemoryStateBackend::new();
        backend.delete(&[ResourceId::from_value(99)]).unwrap();
    }

    #[test]
    fn seeded_backend_loads_its_seed() {
        let id = ResourceId::from_value(4);
        let record = ResourceRecord::fresh(10);
        let backend = MemoryStateBackend::seeded([(id, record)]);
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(id), Some(record));
    }

    #[test]
    fn config_backend_roundtrip() {
        let backend = MemoryConfigBackend::new();
        assert!(backend.load().unwrap().is_none());

        let settings = Settings {
            timeout_minutes: 5,
            ..Settings::default()
        };
        backend.save(&settings).unwrap();
        assert_eq!(backend.load().unwrap(), Some(settings));
    }
}
