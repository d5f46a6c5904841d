//! Trip window builder.
//!
//! Turns the grouped schedule records into candidate (origin, destination)
//! windows, rejecting trips that no longer serve both stops or that run in
//! the wrong direction.

use tracing::debug;

use crate::domain::{ScheduleRecord, StopInfo};
use crate::mbta::TripSchedules;

use super::error::BoardError;

/// The pair of stop visits relevant to one journey for one trip, ordered
/// by stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripWindow {
    pub trip_id: String,
    pub origin: ScheduleRecord,
    pub destination: ScheduleRecord,
}

/// Build candidate windows from grouped schedules.
///
/// A trip qualifies only if exactly two of its stop visits survived the
/// upstream stop filter: one visit means the trip has already passed one
/// boundary (skipped, not an error), while more than two cannot happen
/// under this query shape and is treated as a malformed feed. A window
/// whose first visit does not belong to the origin's stop set runs
/// destination→origin and is rejected, not reversed.
pub fn build_windows(
    schedules: &[TripSchedules],
    origin: &StopInfo,
) -> Result<Vec<TripWindow>, BoardError> {
    let mut windows = Vec::with_capacity(schedules.len());

    for trip in schedules {
        match trip.visits.as_slice() {
            [] | [_] => {
                debug!(trip_id = %trip.trip_id, "trip no longer serves both stops, skipping");
            }
            [first, second] => {
                if !origin.serves(&first.stop_id) {
                    debug!(trip_id = %trip.trip_id, "trip runs in the opposite direction, skipping");
                    continue;
                }
                windows.push(TripWindow {
                    trip_id: trip.trip_id.clone(),
                    origin: first.clone(),
                    destination: second.clone(),
                });
            }
            extra => {
                return Err(BoardError::TooManyVisits {
                    trip_id: trip.trip_id.clone(),
                    count: extra.len(),
                });
            }
        }
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn visit(trip: &str, stop: &str, seq: u32) -> ScheduleRecord {
        ScheduleRecord {
            id: format!("{trip}-{seq}"),
            route_id: "Red".to_string(),
            trip_id: trip.to_string(),
            stop_id: stop.to_string(),
            arrival_time: Some(Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()),
            departure_time: None,
            direction_id: 0,
            stop_sequence: seq,
            prediction_ref: None,
        }
    }

    fn grouped(trip: &str, stops: &[(&str, u32)]) -> TripSchedules {
        TripSchedules {
            trip_id: trip.to_string(),
            visits: stops.iter().map(|(s, seq)| visit(trip, s, *seq)).collect(),
        }
    }

    fn origin_with_children(children: &[&str]) -> StopInfo {
        StopInfo {
            stop_id: "place-origin".to_string(),
            child_stop_ids: children.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn accepts_two_visit_trips_in_direction() {
        let origin = origin_with_children(&["A1", "A2"]);
        let schedules = vec![grouped("t1", &[("A1", 1), ("B1", 2)])];

        let windows = build_windows(&schedules, &origin).unwrap();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].origin.stop_id, "A1");
        assert_eq!(windows[0].destination.stop_id, "B1");
    }

    #[test]
    fn any_child_platform_counts_as_origin() {
        let origin = origin_with_children(&["A1", "A2"]);
        let schedules = vec![grouped("t1", &[("A2", 3), ("B1", 7)])];

        let windows = build_windows(&schedules, &origin).unwrap();
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn singleton_origin_without_children() {
        let origin = StopInfo::standalone("A");
        let schedules = vec![grouped("t1", &[("A", 1), ("B", 2)])];

        let windows = build_windows(&schedules, &origin).unwrap();
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn rejects_wrong_direction() {
        // First visit is at the destination: trip runs B→A.
        let origin = origin_with_children(&["A1"]);
        let schedules = vec![grouped("t1", &[("B1", 1), ("A1", 2)])];

        let windows = build_windows(&schedules, &origin).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn skips_single_visit_trips_without_error() {
        let origin = origin_with_children(&["A1"]);
        let schedules = vec![
            grouped("passed", &[("B1", 2)]),
            grouped("t2", &[("A1", 1), ("B1", 2)]),
        ];

        let windows = build_windows(&schedules, &origin).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].trip_id, "t2");
    }

    #[test]
    fn three_visits_is_malformed() {
        let origin = origin_with_children(&["A1"]);
        let schedules = vec![grouped("t1", &[("A1", 1), ("B1", 2), ("C1", 3)])];

        let err = build_windows(&schedules, &origin).unwrap_err();
        assert_eq!(
            err,
            BoardError::TooManyVisits {
                trip_id: "t1".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn preserves_trip_iteration_order() {
        let origin = origin_with_children(&["A1"]);
        let schedules = vec![
            grouped("t3", &[("A1", 1), ("B1", 2)]),
            grouped("t1", &[("A1", 1), ("B1", 2)]),
            grouped("t2", &[("A1", 1), ("B1", 2)]),
        ];

        let windows = build_windows(&schedules, &origin).unwrap();
        let ids: Vec<_> = windows.iter().map(|w| w.trip_id.as_str()).collect();
        assert_eq!(ids, ["t3", "t1", "t2"]);
    }
}
