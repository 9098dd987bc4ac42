//! Lifecycle signals consumed from the external host

use crate::ResourceId;

/// Progress of a resource update, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStatus {
    /// The resource is in the foreground
    pub foreground: bool,
    /// The resource has finished loading
    pub complete: bool,
}

/// A lifecycle signal emitted by the external host.
///
/// The watcher consumes these to keep idle clocks current; they are the
/// only push-style input the engine receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A resource came into existence
    Created(ResourceId),
    /// A resource became the foreground resource
    Activated(ResourceId),
    /// A resource changed state (navigation, load progress)
    Updated {
        /// The resource that changed
        id: ResourceId,
        /// What the change amounts to
        status: UpdateStatus,
    },
    /// A resource was closed by the host
    Removed(ResourceId),
}

impl LifecycleEvent {
    /// The id the event concerns
    pub fn resource_id(&self) -> ResourceId {
        match self {
            LifecycleEvent::Created(id)
            | LifecycleEvent::Activated(id)
            | LifecycleEvent::Removed(id) => *id,
            LifecycleEvent::Updated { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_exposes_its_id() {
        let id = ResourceId::from_value(9);
        assert_eq!(LifecycleEvent::Created(id).resource_id(), id);
        assert_eq!(LifecycleEvent::Activated(id).resource_id(), id);
        assert_eq!(LifecycleEvent::Removed(id).resource_id(), id);
        assert_eq!(
            LifecycleEvent::Updated {
                id,
                status: UpdateStatus {
                    foreground: true,
                    complete: false
                }
            }
            .resource_id(),
            id
        );
    }
}
