//! Lifecycle-event handling and startup resumption

use crate::WatchError;
use drowse_domain::{LifecycleEvent, ResourceHost, ResourceId};
use drowse_store::{SettingsRegistry, StateStore};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Subscribes to host lifecycle signals and keeps the state store current.
///
/// Event handling is tolerant: a failure while handling one event is
/// logged and the next event is processed. Presentation refreshes are
/// best-effort calls into the host; their failures matter only to
/// diagnostics.
pub struct ResourceWatcher<H: ResourceHost> {
    store: Arc<StateStore>,
    settings: Arc<SettingsRegistry>,
    host: Arc<H>,
}

impl<H: ResourceHost> ResourceWatcher<H> {
    /// Create a watcher over the shared store and host
    pub fn new(store: Arc<StateStore>, settings: Arc<SettingsRegistry>, host: Arc<H>) -> Self {
        Self {
            store,
            settings,
            host,
        }
    }

    /// Enumerate currently-live resources and start tracking any that have
    /// no record yet. Existing idle clocks are left untouched: a relaunch
    /// must not make every resource look freshly used, or resources that
    /// went idle before the restart would dodge eviction.
    ///
    /// Returns how many resources were newly tracked.
    pub fn resume(&self) -> Result<usize, WatchError> {
        let resources = self.host.enumerate()?;
        let total = resources.len();
        let mut newly_tracked = 0;
        for resource in resources {
            if self.store.ensure_tracked(resource.id)? {
                newly_tracked += 1;
            }
        }
        tracing::info!(
            "Resumed tracking: {} live resources, {} newly tracked",
            total,
            newly_tracked
        );
        Ok(newly_tracked)
    }

    /// Apply one lifecycle event to the store.
    ///
    /// Never fails from the caller's view: store write failures are logged
    /// at warn and the event is dropped.
    pub fn handle(&self, event: LifecycleEvent) {
        let debug = self.settings.current().debug;
        match event {
            LifecycleEvent::Created(id) => {
                if let Err(e) = self.store.record_activity(id) {
                    tracing::warn!("Failed to record creation of {}: {}", id, e);
                } else if debug {
                    tracing::debug!("Tracking created resource {}", id);
                }
            }
            LifecycleEvent::Activated(id) => {
                if let Err(e) = self.store.record_activity(id) {
                    tracing::warn!("Failed to record activation of {}: {}", id, e);
                } else if debug {
                    tracing::debug!("Idle clock reset for activated resource {}", id);
                }
                self.refresh_presentation(id, debug);
            }
            LifecycleEvent::Updated { id, status } => {
                // Navigation and load progress do not reset the idle clock;
                // only a finished foreground load warrants a redecorate.
                if status.foreground && status.complete {
                    self.refresh_presentation(id, debug);
                }
            }
            LifecycleEvent::Removed(id) => match self.store.remove(id) {
                Ok(existed) => {
                    if debug && existed {
                        tracing::debug!("Dropped record for removed resource {}", id);
                    }
                }
                Err(e) => tracing::warn!("Failed to drop record for {}: {}", id, e),
            },
        }
    }

    fn refresh_presentation(&self, id: ResourceId, debug: bool) {
        if let Err(e) = self.host.refresh_presentation(id) {
            if debug {
                tracing::debug!("Presentation refresh for {} failed: {}", id, e);
            }
        }
    }

    /// Consume lifecycle events until the channel closes
    pub async fn run(&self, mut events: mpsc::Receiver<LifecycleEvent>) {
        tracing::info!("Resource watcher started");
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::info!("Lifecycle channel closed, watcher stopping");
    }
}
