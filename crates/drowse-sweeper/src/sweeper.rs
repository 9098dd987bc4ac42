//! Core sweep implementation - one periodic eviction pass

use crate::{SweepError, SweepMetrics, SweeperConfig};
use drowse_domain::{decide, Clock, Resource, ResourceHost, Settings, Verdict};
use drowse_store::{SettingsRegistry, StateStore};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Periodic eviction pass over all tracked resources.
///
/// Each tick runs four phases in order:
/// 1. Resynchronize the foreground resource's idle clock (defends against
///    missed activation signals)
/// 2. Evaluate the eviction policy over every live resource and issue
///    suspend actions for the discards
/// 3. Reconcile the state store against the live id set
/// 4. Checkpoint the store
///
/// Settings are read fresh at the start of every tick, so a timeout or
/// allow-list change takes effect on the next pass without a restart.
pub struct Sweeper<H: ResourceHost> {
    store: Arc<StateStore>,
    settings: Arc<SettingsRegistry>,
    host: Arc<H>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
    metrics: SweepMetrics,
}

impl<H: ResourceHost> Sweeper<H> {
    /// Create a sweeper over the shared engine state
    pub fn new(
        config: SweeperConfig,
        store: Arc<StateStore>,
        settings: Arc<SettingsRegistry>,
        host: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            settings,
            host,
            clock,
            config,
            metrics: SweepMetrics::new(),
        }
    }

    /// Get a reference to the current cumulative metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one full sweep tick, returning the updated cumulative metrics.
    ///
    /// Only a failed resource enumeration aborts the tick; every other
    /// failure is logged and the pass moves on. A failed suspend is never
    /// retried within the tick: if the resource is really gone, the next
    /// tick's reconciliation reclaims its record.
    pub fn sweep(&mut self) -> Result<SweepMetrics, SweepError> {
        let started = Instant::now();
        let settings = self.settings.current();

        self.resync_active(settings.debug);

        let resources = self.host.enumerate()?;
        let now_ms = self.clock.now_ms();
        let mut live = HashSet::with_capacity(resources.len());

        for resource in &resources {
            live.insert(resource.id);
            self.evaluate(resource, &settings, now_ms);
        }

        match self.store.reconcile(&live) {
            Ok(removed) => {
                if !removed.is_empty() {
                    self.metrics.record_reclaimed(removed.len());
                    if settings.debug {
                        tracing::debug!("Reclaimed records for closed resources: {:?}", removed);
                    }
                }
            }
            Err(e) => tracing::warn!("Reconciliation failed, retrying next tick: {}", e),
        }

        if let Err(e) = self.store.persist() {
            tracing::warn!("State checkpoint failed: {}", e);
        }

        self.metrics.record_sweep();
        self.metrics.total_runtime_ms += started.elapsed().as_millis() as u64;

        Ok(self.metrics.clone())
    }

    /// Phase 1: reset the foreground resource's idle clock.
    ///
    /// The watcher normally does this on activation signals; doing it
    /// again here means a missed signal costs at most one period of
    /// drift and the foreground resource still cannot be evicted.
    fn resync_active(&mut self, debug: bool) {
        match self.host.active_resource() {
            Ok(Some(resource)) => {
                if let Err(e) = self.store.record_activity(resource.id) {
                    tracing::warn!("Failed to resync active resource {}: {}", resource.id, e);
                }
            }
            Ok(None) => {
                if debug {
                    tracing::debug!("No foreground resource to resync");
                }
            }
            Err(e) => {
                if debug {
                    tracing::debug!("Could not query the foreground resource: {}", e);
                }
            }
        }
    }

    /// Phase 2, per resource: evaluate the policy and act on a discard.
    fn evaluate(&mut self, resource: &Resource, settings: &Settings, now_ms: u64) {
        self.metrics.record_evaluation();

        let record = match self.store.get(resource.id) {
            Some(record) => record,
            None => {
                // A resource the watcher never saw; track it now so its
                // idle clock starts from this tick.
                if let Err(e) = self.store.ensure_tracked(resource.id) {
                    tracing::warn!("Failed to track resource {}: {}", resource.id, e);
                }
                match self.store.get(resource.id) {
                    Some(record) => record,
                    None => return,
                }
            }
        };

        match decide(resource, &record, settings, now_ms) {
            Verdict::Keep(reason) => {
                self.metrics.record_kept(reason);
                if settings.debug {
                    tracing::debug!("Keeping {} ({}): {}", resource.id, reason, resource.title);
                }
            }
            Verdict::Discard => {
                if self.config.dry_run {
                    tracing::info!(
                        "DRY RUN: would discard {} ({})",
                        resource.id,
                        resource.title
                    );
                    return;
                }
                match self.host.suspend(resource.id) {
                    Ok(()) => {
                        self.metrics.record_discard();
                        if settings.debug {
                            tracing::debug!("Discarded {} ({})", resource.id, resource.title);
                        }
                    }
                    Err(e) => {
                        self.metrics.record_discard_failure();
                        if settings.debug {
                            tracing::debug!("Could not discard {}: {}", resource.id, e);
                        }
                    }
                }
            }
        }
    }
}
