//! Drowse Domain Layer
//!
//! Core types and business logic for the drowse eviction engine. This crate
//! has zero external dependencies and defines the fundamental concepts,
//! value objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Resource**: a long-lived external entity (a browser tab) identified
//!   by a host-assigned id
//! - **ResourceRecord**: per-resource bookkeeping (idle clock and user pin)
//! - **Settings**: idle timeout, allow-list, and diagnostics flag
//! - **Eviction policy**: a pure keep-or-discard decision over one resource
//! - **Capability traits**: the seams to the external host and the clock
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles:
//! - No external crate dependencies
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod events;
pub mod policy;
pub mod record;
pub mod resource;
pub mod settings;
pub mod traits;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{LifecycleEvent, UpdateStatus};
pub use policy::{decide, KeepReason, Verdict};
pub use record::ResourceRecord;
pub use resource::{Resource, ResourceId};
pub use settings::{Settings, SettingsPatch, DEFAULT_TIMEOUT_MINUTES};
pub use traits::{HostError, ResourceHost};
