//! Drowse Sweeper
//!
//! Background eviction service for idle resources.
//!
//! # Overview
//!
//! The Sweeper runs the periodic pass that actually frees memory:
//! - **Active resync**: Resetting the foreground resource's idle clock in
//!   case an activation signal was missed
//! - **Policy evaluation**: Deciding keep-or-discard for every live
//!   resource and issuing suspend actions for the discards
//! - **Garbage collection**: Reconciling the state store against the live
//!   id set so closed resources stop occupying bookkeeping
//! - **Checkpointing**: Closing each tick with a store persistence step
//! - **Metrics collection**: Tracking evaluations, discards, and reclaims
//!
//! # Architecture
//!
//! One tick runs the four phases above in order and to completion; ticks
//! never overlap. A failed suspend action is logged and skipped, never
//! retried within the tick. The only failure that abandons a tick is the
//! host refusing to enumerate resources, and the worker just retries a
//! period later.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use std::sync::Arc;
//! use drowse_domain::{Clock, SystemClock};
//! use drowse_store::{MemoryConfigBackend, MemoryStateBackend, SettingsRegistry, StateStore};
//! use drowse_sweeper::{Sweeper, SweeperConfig};
//! # use drowse_domain::{HostError, Resource, ResourceHost, ResourceId};
//! # struct MyHost;
//! # impl ResourceHost for MyHost {
//! #     fn enumerate(&self) -> Result<Vec<Resource>, HostError> { Ok(vec![]) }
//! #     fn active_resource(&self) -> Result<Option<Resource>, HostError> { Ok(None) }
//! #     fn suspend(&self, _id: ResourceId) -> Result<(), HostError> { Ok(()) }
//! #     fn refresh_presentation(&self, _id: ResourceId) -> Result<(), HostError> { Ok(()) }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! let store = Arc::new(StateStore::open(MemoryStateBackend::new(), clock.clone()));
//! let settings = Arc::new(SettingsRegistry::load(MemoryConfigBackend::new()));
//! let host = Arc::new(MyHost);
//!
//! let mut sweeper = Sweeper::new(SweeperConfig::default(), store, settings, host, clock);
//! let metrics = sweeper.sweep()?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use drowse_domain::{Clock, SystemClock};
//! # use drowse_store::{MemoryConfigBackend, MemoryStateBackend, SettingsRegistry, StateStore};
//! use drowse_sweeper::{SweepWorker, SweeperConfig};
//! # use drowse_domain::{HostError, Resource, ResourceHost, ResourceId};
//! # struct MyHost;
//! # impl ResourceHost for MyHost {
//! #     fn enumerate(&self) -> Result<Vec<Resource>, HostError> { Ok(vec![]) }
//! #     fn active_resource(&self) -> Result<Option<Resource>, HostError> { Ok(None) }
//! #     fn suspend(&self, _id: ResourceId) -> Result<(), HostError> { Ok(()) }
//! #     fn refresh_presentation(&self, _id: ResourceId) -> Result<(), HostError> { Ok(()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!     let store = Arc::new(StateStore::open(MemoryStateBackend::new(), clock.clone()));
//!     let settings = Arc::new(SettingsRegistry::load(MemoryConfigBackend::new()));
//!     let host = Arc::new(MyHost);
//!
//!     let config = SweeperConfig::default();
//!     let mut worker = SweepWorker::new(config, store, settings, host, clock);
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The Sweeper can be configured via TOML:
//!
//! ```toml
//! [sweeper]
//! period_secs = 60
//! dry_run = false
//! ```
//!
//! The user-facing knobs (idle timeout, allow-list, diagnostics) live in
//! the settings registry, not here; the sweeper reads them fresh at the
//! start of every tick.

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod sweeper;
mod worker;

pub use config::SweeperConfig;
pub use error::SweepError;
pub use metrics::SweepMetrics;
pub use sweeper::Sweeper;
pub use worker::SweepWorker;
