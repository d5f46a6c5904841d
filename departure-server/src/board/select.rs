//! Departure selector: the admission filter over candidate windows.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::{PredictionRecord, TripRecord, format_duration};

use super::config::BoardConfig;
use super::error::BoardError;
use super::timing::{ResolvedTiming, resolve_timing};
use super::window::TripWindow;

/// One published upcoming departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureEntry {
    pub trip_id: String,

    /// The trip's headsign.
    pub destination_label: String,

    pub expected_time: DateTime<Utc>,

    /// Signed; negative means running early.
    pub delay: Duration,

    /// Signed; strictly greater than the configured offset by the
    /// admission rule.
    pub time_remaining: Duration,

    /// Resolved timing at the destination stop. Computed for every
    /// admitted trip but informational only; admission and display use
    /// origin timing.
    pub destination_timing: Option<ResolvedTiming>,
}

impl DepartureEntry {
    /// Human-readable delay, e.g. `"5m"` or `"0s"`.
    pub fn delay_text(&self) -> String {
        format_duration(self.delay)
    }

    /// Human-readable time remaining until the origin event.
    pub fn time_remaining_text(&self) -> String {
        format_duration(self.time_remaining)
    }
}

/// Run the admission loop over the candidate windows, in inherited order.
///
/// A trip is admitted when its origin time-remaining strictly exceeds the
/// configured offset. The loop terminates once the admitted count exceeds
/// `trips_limit + 1`; that threshold is deliberate and pinned by
/// `admission_loop_boundary` in the tests (see `select_departures` for
/// the published bound).
pub fn admit_departures(
    windows: &[TripWindow],
    trips: &HashMap<String, TripRecord>,
    predictions: &HashMap<String, PredictionRecord>,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DepartureEntry>, BoardError> {
    let mut entries = Vec::new();
    let mut admitted = 0usize;

    for window in windows {
        let origin_timing = resolve_timing(&window.origin, predictions, now)?;
        let destination_timing = resolve_timing(&window.destination, predictions, now)?;

        if origin_timing.time_remaining <= config.offset() {
            debug!(
                trip_id = %window.trip_id,
                remaining_secs = origin_timing.time_remaining.num_seconds(),
                "trip inside the departure offset, skipping"
            );
            continue;
        }

        let trip = trips
            .get(&window.trip_id)
            .ok_or_else(|| BoardError::UnknownTrip(window.trip_id.clone()))?;

        entries.push(DepartureEntry {
            trip_id: window.trip_id.clone(),
            destination_label: trip.headsign.clone(),
            expected_time: origin_timing.expected,
            delay: origin_timing.delay,
            time_remaining: origin_timing.time_remaining,
            destination_timing: Some(destination_timing),
        });

        admitted += 1;
        if admitted > config.trips_limit + 1 {
            break;
        }
    }

    Ok(entries)
}

/// Produce the published departure list: the admission loop's output
/// bounded to `trips_limit` entries, earliest first (the inherited order,
/// never re-sorted).
pub fn select_departures(
    windows: &[TripWindow],
    trips: &HashMap<String, TripRecord>,
    predictions: &HashMap<String, PredictionRecord>,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DepartureEntry>, BoardError> {
    let mut entries = admit_departures(windows, trips, predictions, config, now)?;
    entries.truncate(config.trips_limit);
    Ok(entries)
}
