//! The schedule-prediction reconciliation engine.
//!
//! Given the extracted feed for one route, this module identifies the
//! trips that genuinely run origin→destination, merges each trip's
//! schedule with its live prediction, and produces the bounded, ordered
//! list of upcoming departures. It is pure and synchronous; all I/O lives
//! in the `mbta` module.

mod config;
mod error;
mod select;
mod timing;
mod window;

use chrono::{DateTime, Utc};

use crate::domain::StopInfo;
use crate::mbta::ExtractedFeed;

pub use config::BoardConfig;
pub use error::BoardError;
pub use select::{DepartureEntry, admit_departures, select_departures};
pub use timing::{ResolvedTiming, resolve_timing};
pub use window::{TripWindow, build_windows};

/// Compute the departure board for one extracted feed.
///
/// An empty feed (no schedules for the route/stop pair) is not an error;
/// it yields an empty board.
pub fn compute(
    feed: &ExtractedFeed,
    origin: &StopInfo,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DepartureEntry>, BoardError> {
    let windows = build_windows(&feed.schedules, origin)?;
    select_departures(&windows, &feed.trips, &feed.predictions, config, now)
}

#[cfg(test)]
mod tests {
    //! End-to-end scenarios over `compute`, with origin child platforms
    //! {A1, A2} and destination child platform {B1}.

    use super::*;
    use crate::domain::{PredictionRecord, ScheduleRecord, TripRecord};
    use crate::mbta::TripSchedules;
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, h, m, 0).unwrap()
    }

    fn origin() -> StopInfo {
        StopInfo {
            stop_id: "place-a".to_string(),
            child_stop_ids: ["A1", "A2"].iter().map(|s| s.to_string()).collect(),
        }
    }

    fn feed_with_trip(prediction: Option<PredictionRecord>) -> ExtractedFeed {
        let origin_visit = ScheduleRecord {
            id: "s1".to_string(),
            route_id: "Red".to_string(),
            trip_id: "T1".to_string(),
            stop_id: "A1".to_string(),
            arrival_time: None,
            departure_time: Some(at(8, 0)),
            direction_id: 0,
            stop_sequence: 1,
            prediction_ref: prediction.as_ref().map(|p| p.id.clone()),
        };
        let destination_visit = ScheduleRecord {
            id: "s2".to_string(),
            stop_id: "B1".to_string(),
            arrival_time: Some(at(8, 10)),
            departure_time: None,
            stop_sequence: 2,
            prediction_ref: None,
            ..origin_visit.clone()
        };

        ExtractedFeed {
            schedules: vec![TripSchedules {
                trip_id: "T1".to_string(),
                visits: vec![origin_visit, destination_visit],
            }],
            trips: HashMap::from([(
                "T1".to_string(),
                TripRecord {
                    id: "T1".to_string(),
                    route_id: "Red".to_string(),
                    direction_id: 0,
                    name: String::new(),
                    headsign: "Braintree".to_string(),
                },
            )]),
            predictions: prediction
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    #[test]
    fn schedule_only_trip_departs_on_time() {
        let feed = feed_with_trip(None);
        let config = BoardConfig::new(2, 0);

        let entries = compute(&feed, &origin(), &config, at(7, 50)).unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        // Origin visit has no arrival, so the departure event is reported.
        assert_eq!(entry.expected_time, at(8, 0));
        assert_eq!(entry.delay_text(), "0s");
        assert_eq!(entry.time_remaining_text(), "10m");
        assert_eq!(entry.destination_label, "Braintree");
    }

    #[test]
    fn prediction_shifts_expected_time() {
        let feed = feed_with_trip(Some(PredictionRecord {
            id: "p1".to_string(),
            stop_id: "A1".to_string(),
            trip_id: "T1".to_string(),
            arrival_time: None,
            arrival_uncertainty: None,
            departure_time: Some(at(8, 5)),
            departure_uncertainty: None,
        }));
        let config = BoardConfig::new(2, 0);

        let entries = compute(&feed, &origin(), &config, at(7, 50)).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].expected_time, at(8, 5));
        assert_eq!(entries[0].delay_text(), "5m");
    }

    #[test]
    fn offset_suppresses_near_departures() {
        let feed = feed_with_trip(None);
        // 15-minute offset, 10 minutes remaining: nothing scheduled.
        let config = BoardConfig::new(2, Duration::minutes(15).num_seconds());

        let entries = compute(&feed, &origin(), &config, at(7, 50)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn empty_feed_is_an_empty_board() {
        let feed = ExtractedFeed::default();
        let config = BoardConfig::default();

        let entries = compute(&feed, &origin(), &config, at(7, 50)).unwrap();
        assert!(entries.is_empty());
    }
}
