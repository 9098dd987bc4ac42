//! Error types for watcher operations

use thiserror::Error;

/// Errors that can occur while resuming resource tracking
#[derive(Error, Debug)]
pub enum WatchError {
    /// The host could not be queried
    #[error("Host error: {0}")]
    Host(#[from] drowse_domain::HostError),

    /// The state store could not be updated
    #[error("Store error: {0}")]
    Store(#[from] drowse_store::StoreError),
}
