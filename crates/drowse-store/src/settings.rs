//! The settings registry - process-lifetime eviction configuration

use crate::ConfigBackend;
use drowse_domain::{Settings, SettingsPatch};
use std::sync::RwLock;

/// Holds the last-known settings and persists every merge.
///
/// Two mutation paths exist, control-surface updates and external
/// configuration-change notifications, with identical merge semantics:
/// last write wins per field, absent fields are untouched. `current`
/// never fails; it always answers with the last-known values.
pub struct SettingsRegistry {
    settings: RwLock<Settings>,
    backend: Box<dyn ConfigBackend>,
}

impl SettingsRegistry {
    /// Rehydrate the registry from its backend.
    ///
    /// Absent or unreadable durable settings fall back to the defaults
    /// (30-minute timeout, empty allow-list, diagnostics off).
    pub fn load(backend: impl ConfigBackend + 'static) -> Self {
        let settings = match backend.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("Unreadable settings store, using defaults: {}", e);
                Settings::default()
            }
        };
        Self {
            settings: RwLock::new(settings),
            backend: Box::new(backend),
        }
    }

    /// The last-known settings
    pub fn current(&self) -> Settings {
        self.settings.read().unwrap().clone()
    }

    /// Apply a partial update arriving from the control surface
    pub fn apply_control_update(&self, patch: SettingsPatch) -> Settings {
        self.apply(patch, "control")
    }

    /// Apply a partial update arriving from an external
    /// configuration-change notification
    pub fn apply_external_change(&self, patch: SettingsPatch) -> Settings {
        self.apply(patch, "external")
    }

    fn apply(&self, patch: SettingsPatch, source: &str) -> Settings {
        let mut settings = self.settings.write().unwrap();
        settings.merge(patch);
        // The merge is already effective in memory; a failed save is
        // logged and healed by the next successful one.
        if let Err(e) = self.backend.save(&settings) {
            tracing::warn!("Failed to persist settings ({} update): {}", source, e);
        }
        let merged = settings.clone();
        drop(settings);

        if merged.debug {
            tracing::debug!(
                "Settings updated from {}: timeout={}m, allow_list={:?}, debug={}",
                source,
                merged.timeout_minutes,
                merged.allow_list,
                merged.debug
            );
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryConfigBackend;
    use std::sync::Arc;

    #[test]
    fn empty_backend_loads_defaults() {
        let registry = SettingsRegistry::load(MemoryConfigBackend::new());
        assert_eq!(registry.current(), Settings::default());
    }

    #[test]
    fn seeded_backend_wins_over_defaults() {
        let seeded = Settings {
            timeout_minutes: 5,
            allow_list: vec!["docs.rs".to_string()],
            debug: true,
        };
        let registry = SettingsRegistry::load(MemoryConfigBackend::seeded(seeded.clone()));
        assert_eq!(registry.current(), seeded);
    }

    #[test]
    fn updates_merge_and_persist() {
        let backend = Arc::new(MemoryConfigBackend::new());
        let registry = SettingsRegistry::load(backend.clone());

        let merged = registry.apply_control_update(SettingsPatch {
            timeout_minutes: Some(10),
            ..SettingsPatch::default()
        });
        assert_eq!(merged.timeout_minutes, 10);
        assert_eq!(backend.saved().unwrap().timeout_minutes, 10);
    }

    #[test]
    fn both_paths_converge_regardless_of_order() {
        let control = SettingsPatch {
            timeout_minutes: Some(10),
            ..SettingsPatch::default()
        };
        let external = SettingsPatch {
            debug: Some(true),
            ..SettingsPatch::default()
        };

        let first = SettingsRegistry::load(MemoryConfigBackend::new());
        first.apply_control_update(control.clone());
        first.apply_external_change(external.clone());

        let second = SettingsRegistry::load(MemoryConfigBackend::new());
        second.apply_external_change(external);
        second.apply_control_update(control);

        assert_eq!(first.current(), second.current());
        assert_eq!(first.current().timeout_minutes, 10);
        assert!(first.current().debug);
    }

    #[test]
    fn same_field_resolves_to_the_last_writer() {
        let registry = SettingsRegistry::load(MemoryConfigBackend::new());
        registry.apply_control_update(SettingsPatch {
            timeout_minutes: Some(10),
            ..SettingsPatch::default()
        });
        registry.apply_external_change(SettingsPatch {
            timeout_minutes: Some(20),
            ..SettingsPatch::default()
        });
        assert_eq!(registry.current().timeout_minutes, 20);
    }

    #[test]
    fn a_new_registry_resumes_from_persisted_settings() {
        let backend = Arc::new(MemoryConfigBackend::new());
        let registry = SettingsRegistry::load(backend.clone());
        registry.apply_control_update(SettingsPatch {
            allow_list: Some(vec!["mail".to_string()]),
            ..SettingsPatch::default()
        });
        drop(registry);

        let reloaded = SettingsRegistry::load(backend);
        assert_eq!(reloaded.current().allow_list, vec!["mail".to_string()]);
    }
}
