//! Configuration for the sweep worker

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_PERIOD_SECS: u64 = 60;

/// Configuration for the sweep worker.
///
/// This is deployment configuration, distinct from the user-facing
/// settings the registry owns: changing the idle timeout or the
/// allow-list never requires touching this.
///
/// # Examples
///
/// ```
/// use drowse_sweeper::SweeperConfig;
///
/// let config = SweeperConfig::default();
/// assert_eq!(config.period_secs, 60);
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// How often to run a sweep tick (in seconds)
    /// Default: 60 (one minute)
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,

    /// Dry-run mode: log what would be discarded without suspending
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_period_secs() -> u64 {
    DEFAULT_PERIOD_SECS
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            period_secs: DEFAULT_PERIOD_SECS,
            dry_run: false,
        }
    }
}

impl SweeperConfig {
    /// Get the sweep period as a Duration
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}
