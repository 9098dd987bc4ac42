//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and the host
//! environment. Implementations live outside this crate: production
//! adapters wrap the real browser APIs, tests substitute in-memory fakes.

use crate::{Resource, ResourceId};
use std::fmt;

/// Error reported by a host capability call.
///
/// Host failures are expected operating conditions (a resource can vanish
/// between enumeration and suspension), so this carries just enough to
/// log and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The resource no longer exists on the host
    Gone(ResourceId),
    /// The host refused or failed the call
    Failed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Gone(id) => write!(f, "resource {} no longer exists", id),
            HostError::Failed(msg) => write!(f, "host call failed: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Capability interface to the external resource manager.
///
/// Every method is best-effort: the engine never assumes two host calls
/// observe the same world, and a failed call is a value to handle, not a
/// reason to stop.
pub trait ResourceHost: Send + Sync {
    /// Enumerate all currently-live resources
    fn enumerate(&self) -> Result<Vec<Resource>, HostError>;

    /// The current foreground resource, if any
    fn active_resource(&self) -> Result<Option<Resource>, HostError>;

    /// Suspend a resource, freeing its runtime footprint while preserving
    /// its identity so the host can restore it on demand
    fn suspend(&self, id: ResourceId) -> Result<(), HostError>;

    /// Ask the presentation layer to refresh its decoration (icon, badge)
    /// for a resource
    fn refresh_presentation(&self, id: ResourceId) -> Result<(), HostError>;
}
