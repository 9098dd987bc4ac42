//! Resource types - the external entities the engine tracks

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a resource, assigned by the external host.
///
/// The host owns id allocation; the engine never mints ids, it only keys
/// its bookkeeping by them. Ids may be recycled by the host after a
/// resource is closed, which is why closed resources must be dropped from
/// the bookkeeping promptly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Create a ResourceId from a raw host-assigned value
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid resource id: {}", e))
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A point-in-time view of one resource, as reported by the host.
///
/// Snapshots are not owned by the engine: the host is queried on demand and
/// a snapshot is only trusted for the duration of a single evaluation. Two
/// host calls may observe different worlds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Host-assigned identifier
    pub id: ResourceId,
    /// Current URL
    pub url: String,
    /// Human-readable title
    pub title: String,
    /// Favicon URL, if the host reports one
    pub fav_icon_url: Option<String>,
    /// Whether the resource is in the foreground
    pub active: bool,
    /// Whether the host itself pins the resource (independent of the
    /// user pin the engine manages)
    pub pinned: bool,
    /// Whether the resource is currently emitting audio
    pub audible: bool,
    /// Whether the host has already discarded the resource
    pub discarded: bool,
}

impl Resource {
    /// Create a background, unpinned, silent, non-discarded resource
    pub fn new(id: ResourceId, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: title.into(),
            fav_icon_url: None,
            active: false,
            pinned: false,
            audible: false,
            discarded: false,
        }
    }
}
