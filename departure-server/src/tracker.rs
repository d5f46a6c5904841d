//! Per-journey departure tracking.
//!
//! A `DepartureTracker` owns the data source and the configuration for
//! one origin/destination journey on one route. Each `refresh` recomputes
//! the board from scratch and returns a complete snapshot; the poller
//! swaps it in atomically, so a failed cycle leaves the previous snapshot
//! untouched.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::board::{self, BoardConfig, BoardError, DepartureEntry};
use crate::domain::RouteInfo;
use crate::mbta::{ExtractError, MbtaError, TransitSource, extract_feed};

/// The journey one tracker computes departures for.
#[derive(Debug, Clone)]
pub struct JourneyConfig {
    /// Route display name, e.g. "Red Line".
    pub route: String,
    /// Origin stop name, e.g. "Alewife".
    pub origin: String,
    /// Destination stop name, e.g. "South Station".
    pub destination: String,
}

/// Sentinel state published when no departures remain.
pub const NOTHING_SCHEDULED: &str = "Nothing Scheduled";

/// One complete, self-contained board computation.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub route: RouteInfo,
    pub origin_name: String,
    pub destination_name: String,
    pub computed_at: DateTime<Utc>,
    /// Upcoming departures, earliest first, at most `trips_limit` entries.
    pub departures: Vec<DepartureEntry>,
}

impl BoardSnapshot {
    /// The primary state: time remaining until the first departure, or
    /// the "Nothing Scheduled" sentinel when the board is empty.
    pub fn state(&self) -> String {
        match self.departures.first() {
            Some(entry) => entry.time_remaining_text(),
            None => NOTHING_SCHEDULED.to_string(),
        }
    }
}

/// Errors from one refresh cycle.
///
/// The poller treats any of these as "keep the previous snapshot, retry
/// next cycle".
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The data source failed or returned an error
    #[error(transparent)]
    Source(#[from] MbtaError),

    /// The fetched document was malformed
    #[error("malformed payload: {0}")]
    Malformed(#[from] ExtractError),

    /// The feed violated the engine's invariants
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A configured stop name was not found on the route
    #[error("stop not found on route: {0}")]
    StopNotFound(String),
}

/// Tracks upcoming departures for one configured journey.
pub struct DepartureTracker<S> {
    source: S,
    journey: JourneyConfig,
    config: BoardConfig,
}

impl<S: TransitSource> DepartureTracker<S> {
    /// Create a tracker for a journey.
    pub fn new(source: S, journey: JourneyConfig, config: BoardConfig) -> Self {
        Self {
            source,
            journey,
            config,
        }
    }

    pub fn journey(&self) -> &JourneyConfig {
        &self.journey
    }

    /// Recompute the board once.
    ///
    /// Fetches the catalogs and the schedules document, extracts the feed
    /// and runs the reconciliation engine. Fails whole: no partial
    /// snapshot is ever produced.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Result<BoardSnapshot, RefreshError> {
        let route = self.source.route_by_name(&self.journey.route).await?;
        let stops = self.source.stops_for_route(&route.id).await?;

        let origin = stops
            .get(&self.journey.origin)
            .ok_or_else(|| RefreshError::StopNotFound(self.journey.origin.clone()))?;
        let destination = stops
            .get(&self.journey.destination)
            .ok_or_else(|| RefreshError::StopNotFound(self.journey.destination.clone()))?;

        let mut stop_ids = origin.query_ids();
        stop_ids.extend(destination.query_ids());

        // Schedules for the remainder of the service day, local time.
        let min_time = now
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string();

        let document = self
            .source
            .schedules(&route.id, &stop_ids, &min_time)
            .await?;
        let feed = extract_feed(&document)?;
        let departures = board::compute(&feed, origin, &self.config, now)?;

        debug!(
            route = %route.id,
            candidates = feed.schedules.len(),
            departures = departures.len(),
            "board recomputed"
        );

        Ok(BoardSnapshot {
            route,
            origin_name: self.journey.origin.clone(),
            destination_name: self.journey.destination.clone(),
            computed_at: now,
            departures,
        })
    }
}
