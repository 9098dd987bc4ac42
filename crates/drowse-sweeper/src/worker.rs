//! Background worker for continuous sweep operation

use crate::{SweepError, SweepMetrics, Sweeper, SweeperConfig};
use drowse_domain::{Clock, ResourceHost};
use drowse_store::{SettingsRegistry, StateStore};
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Background worker that runs the sweeper on a schedule.
///
/// The interval's first tick completes immediately, so a relaunched
/// process re-evaluates its rehydrated bookkeeping right away instead of
/// waiting out a full period. Each tick is awaited to completion before
/// the next one can start, so ticks never overlap.
pub struct SweepWorker<H: ResourceHost> {
    sweeper: Sweeper<H>,
    period: Duration,
}

impl<H: ResourceHost> SweepWorker<H> {
    /// Create a new background worker with the given configuration
    pub fn new(
        config: SweeperConfig,
        store: Arc<StateStore>,
        settings: Arc<SettingsRegistry>,
        host: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let period = config.period();
        Self {
            sweeper: Sweeper::new(config, store, settings, host, clock),
            period,
        }
    }

    /// Run the worker indefinitely.
    ///
    /// Sweeps at the configured period until a shutdown signal (Ctrl+C)
    /// is received. A failed tick is logged and the worker keeps going;
    /// the condition that failed it may well have cleared a period later.
    pub async fn run(&mut self) -> Result<(), SweepError> {
        let mut ticker = interval(self.period);

        tracing::info!("Sweep worker started (period: {:?})", self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting sweep tick");

                    match self.sweeper.sweep() {
                        Ok(metrics) => {
                            tracing::info!(
                                "Sweep completed: {} evaluated, {} discarded, {} reclaimed",
                                metrics.evaluated,
                                metrics.discarded,
                                metrics.reclaimed
                            );
                        }
                        Err(e) => {
                            tracing::error!("Sweep failed: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping sweeper");
                    break;
                }
            }
        }

        // Print final metrics
        let metrics = self.sweeper.metrics();
        tracing::info!("Sweeper stopped. Final metrics:\n{}", metrics.summary());

        Ok(())
    }

    /// Run for a specific number of ticks (useful for testing).
    ///
    /// Unlike [`run`](Self::run), a failed tick stops the worker and
    /// returns the error.
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<(), SweepError> {
        let mut ticker = interval(self.period);

        tracing::info!(
            "Sweep worker started for {} cycles (period: {:?})",
            cycles,
            self.period
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            tracing::debug!("Starting sweep tick {}/{}", cycle + 1, cycles);

            match self.sweeper.sweep() {
                Ok(metrics) => {
                    tracing::info!(
                        "Sweep {}/{} completed: {} evaluated, {} discarded, {} reclaimed",
                        cycle + 1,
                        cycles,
                        metrics.evaluated,
                        metrics.discarded,
                        metrics.reclaimed
                    );
                }
                Err(e) => {
                    tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!("Sweep worker finished {} cycles", cycles);

        Ok(())
    }

    /// Get a reference to the sweeper's current metrics
    pub fn metrics(&self) -> &SweepMetrics {
        self.sweeper.metrics()
    }

    /// Reset the sweeper's metrics counters
    pub fn reset_metrics(&mut self) {
        self.sweeper.reset_metrics();
    }
}
