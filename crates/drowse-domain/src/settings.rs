//! User-facing eviction configuration

/// Default idle timeout in minutes
pub const DEFAULT_TIMEOUT_MINUTES: u32 = 30;

/// User-facing eviction configuration.
///
/// Owned by the settings registry, rehydrated from the durable
/// configuration store at startup, and mutated only through field-wise
/// merges of a [`SettingsPatch`]. The `debug` flag gates diagnostic log
/// verbosity only; it never influences an eviction decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Idle threshold in minutes; a resource idle at least this long is
    /// eligible for discard
    pub timeout_minutes: u32,
    /// URL substrings; a resource whose URL contains any non-empty entry
    /// is exempt from eviction
    pub allow_list: Vec<String>,
    /// Diagnostic verbosity toggle
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_minutes: DEFAULT_TIMEOUT_MINUTES,
            allow_list: Vec::new(),
            debug: false,
        }
    }
}

impl Settings {
    /// Idle threshold converted to milliseconds
    pub fn timeout_ms(&self) -> u64 {
        u64::from(self.timeout_minutes) * 60_000
    }

    /// Whether `url` matches the allow-list (substring containment).
    ///
    /// Empty entries never match: an empty substring is contained in every
    /// URL, which would silently exempt everything.
    pub fn is_allow_listed(&self, url: &str) -> bool {
        self.allow_list
            .iter()
            .any(|entry| !entry.is_empty() && url.contains(entry.as_str()))
    }

    /// Merge a patch into these settings, field-wise last-write-wins.
    ///
    /// Fields absent from the patch are left untouched, so updates arriving
    /// from different sources converge regardless of order as long as they
    /// touch different fields.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(timeout_minutes) = patch.timeout_minutes {
            self.timeout_minutes = timeout_minutes;
        }
        if let Some(allow_list) = patch.allow_list {
            self.allow_list = allow_list;
        }
        if let Some(debug) = patch.debug {
            self.debug = debug;
        }
    }
}

/// A partial settings update; only the populated fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    /// New idle threshold in minutes, if present
    pub timeout_minutes: Option<u32>,
    /// Replacement allow-list, if present
    pub allow_list: Option<Vec<String>>,
    /// New diagnostics flag, if present
    pub debug: Option<bool>,
}

impl SettingsPatch {
    /// Whether the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.timeout_minutes.is_none() && self.allow_list.is_none() && self.debug.is_none()
    }
}
