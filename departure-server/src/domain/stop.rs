//! Stop and child-platform types.

use std::collections::BTreeSet;

/// A logical named stop, e.g. a station.
///
/// A station may consist of one platform-less canonical stop plus zero or
/// more physical child platforms. Schedule and prediction records carry
/// platform-level stop IDs, so membership checks must run against the
/// child set when one exists and fall back to the canonical ID otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopInfo {
    /// Canonical stop ID (the parent station when children exist).
    pub stop_id: String,

    /// Physical child-platform stop IDs, possibly empty.
    pub child_stop_ids: BTreeSet<String>,
}

impl StopInfo {
    /// Create a stop with no child platforms.
    pub fn standalone(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            child_stop_ids: BTreeSet::new(),
        }
    }

    /// Whether a schedule/prediction stop ID belongs to this stop.
    pub fn serves(&self, stop_id: &str) -> bool {
        if self.child_stop_ids.is_empty() {
            self.stop_id == stop_id
        } else {
            self.child_stop_ids.contains(stop_id)
        }
    }

    /// The stop IDs to use in schedule queries: the child platforms when
    /// present, otherwise the canonical ID alone.
    pub fn query_ids(&self) -> Vec<String> {
        if self.child_stop_ids.is_empty() {
            vec![self.stop_id.clone()]
        } else {
            self.child_stop_ids.iter().cloned().collect()
        }
    }
}
