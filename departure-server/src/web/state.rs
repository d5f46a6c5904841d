//! Shared application state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::tracker::BoardSnapshot;

/// Shared state: the latest successfully computed board snapshot.
///
/// `None` until the first poll succeeds. Snapshots are replaced whole,
/// never mutated in place.
#[derive(Clone, Default)]
pub struct AppState {
    snapshot: Arc<RwLock<Option<BoardSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly computed snapshot.
    pub async fn publish(&self, snapshot: BoardSnapshot) {
        *self.snapshot.write().await = Some(snapshot);
    }

    /// The latest snapshot, if any poll has succeeded yet.
    pub async fn latest(&self) -> Option<BoardSnapshot> {
        self.snapshot.read().await.clone()
    }
}
