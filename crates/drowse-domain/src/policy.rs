//! Eviction policy - the pure keep-or-discard decision
//!
//! The policy is a pure function over a resource snapshot, its record, the
//! current settings, and a timestamp. All side effects (suspending,
//! logging, persistence) belong to the sweeper; keeping the decision pure
//! is what makes the guard ordering and the threshold arithmetic directly
//! testable.

use crate::{Resource, ResourceRecord, Settings};
use std::fmt;

/// Outcome of evaluating one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Suspend the resource
    Discard,
    /// Leave the resource alone, for the named reason
    Keep(KeepReason),
}

impl Verdict {
    /// Whether the verdict is a discard
    pub fn is_discard(&self) -> bool {
        matches!(self, Verdict::Discard)
    }
}

/// Why a resource was kept.
///
/// Variants are listed in guard-evaluation order; the first guard that
/// holds wins, so a foreground, audible resource is reported as `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepReason {
    /// The resource is in the foreground
    Active,
    /// Already discarded; suspending again would be redundant
    AlreadyDiscarded,
    /// Currently emitting audio
    Audible,
    /// Pinned by the host itself
    BrowserPinned,
    /// Pinned by the user through the control surface
    Protected,
    /// URL matches an allow-list entry
    AllowListed,
    /// Not yet idle past the configured timeout
    WithinTimeout,
}

impl KeepReason {
    /// Short name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            KeepReason::Active => "active",
            KeepReason::AlreadyDiscarded => "already-discarded",
            KeepReason::Audible => "audible",
            KeepReason::BrowserPinned => "browser-pinned",
            KeepReason::Protected => "protected",
            KeepReason::AllowListed => "allow-listed",
            KeepReason::WithinTimeout => "within-timeout",
        }
    }
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether `resource` should be discarded at `now_ms`.
///
/// Guards are evaluated in a fixed order and short-circuit at the first
/// one that holds; every guard implies keeping the resource. A resource
/// with no guard held is discarded once its idle duration reaches the
/// configured timeout. Reaching the threshold exactly triggers the
/// discard, not just exceeding it. The `debug` setting plays no part in
/// the decision.
pub fn decide(
    resource: &Resource,
    record: &ResourceRecord,
    settings: &Settings,
    now_ms: u64,
) -> Verdict {
    if resource.active {
        return Verdict::Keep(KeepReason::Active);
    }
    if resource.discarded {
        return Verdict::Keep(KeepReason::AlreadyDiscarded);
    }
    if resource.audible {
        return Verdict::Keep(KeepReason::Audible);
    }
    if resource.pinned {
        return Verdict::Keep(KeepReason::BrowserPinned);
    }
    if record.protected {
        return Verdict::Keep(KeepReason::Protected);
    }
    if settings.is_allow_listed(&resource.url) {
        return Verdict::Keep(KeepReason::AllowListed);
    }
    if record.idle_for_ms(now_ms) >= settings.timeout_ms() {
        Verdict::Discard
    } else {
        Verdict::Keep(KeepReason::WithinTimeout)
    }
}
