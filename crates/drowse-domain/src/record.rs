//! Per-resource bookkeeping owned by the state store

/// Durable bookkeeping for one tracked resource.
///
/// `idle_since_ms` is the wall-clock timestamp of the last observed
/// activity; `protected` is the user-toggled pin, independent of any
/// pinning the host does on its own. Records survive process restarts via
/// the state store's write-through backend, so an idle clock keeps running
/// across a relaunch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Timestamp of last observed activity, in milliseconds
    pub idle_since_ms: u64,
    /// User-toggled pin exempting the resource from eviction
    pub protected: bool,
}

impl ResourceRecord {
    /// Create a fresh record: last active now, not protected
    pub fn fresh(now_ms: u64) -> Self {
        Self {
            idle_since_ms: now_ms,
            protected: false,
        }
    }

    /// Elapsed idle time at `now_ms`, in milliseconds.
    ///
    /// Saturating: a backward wall-clock step yields zero idle time rather
    /// than an enormous one, so clock skew can only delay eviction.
    pub fn idle_for_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.idle_since_ms)
    }
}
