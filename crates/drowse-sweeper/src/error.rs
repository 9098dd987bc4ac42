//! Error types for sweep operations

use thiserror::Error;

/// Errors that can abort a sweep tick.
///
/// Most failures inside a tick (a suspend refused, a store write lost)
/// are logged and tolerated; only being unable to see the live resource
/// set at all makes the tick meaningless.
#[derive(Error, Debug)]
pub enum SweepError {
    /// The host could not enumerate live resources; the tick is abandoned
    /// and retried at the next period
    #[error("Host error: {0}")]
    Host(#[from] drowse_domain::HostError),
}
