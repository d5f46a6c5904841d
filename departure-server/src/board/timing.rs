//! Timing resolver: merges a scheduled stop visit with its live
//! prediction, when one exists.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::{PredictionRecord, ScheduleRecord, StopEvent};

use super::error::BoardError;

/// Resolved timing for one stop visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTiming {
    /// Which event this visit reports: arrival when the schedule has one,
    /// departure otherwise.
    pub event: StopEvent,

    /// The static scheduled time for the event.
    pub scheduled: DateTime<Utc>,

    /// The live predicted time when available, else the scheduled time.
    pub expected: DateTime<Utc>,

    /// `expected - scheduled`; negative means running early.
    pub delay: Duration,

    /// `expected - now`; negative means already due or passed. Never
    /// clamped to zero.
    pub time_remaining: Duration,

    /// Prediction uncertainty for the event, carried for observability
    /// only.
    pub uncertainty: Option<i64>,
}

/// Resolve the timing of one stop visit against the prediction mapping.
///
/// A `prediction_ref` that does not resolve, or resolves to a prediction
/// for a different trip or stop, is treated as absent; the scheduled time
/// then stands unconditionally. A visit with neither time is a malformed
/// feed.
pub fn resolve_timing(
    visit: &ScheduleRecord,
    predictions: &HashMap<String, PredictionRecord>,
    now: DateTime<Utc>,
) -> Result<ResolvedTiming, BoardError> {
    let (event, scheduled) = match (visit.arrival_time, visit.departure_time) {
        (Some(arrival), _) => (StopEvent::Arrival, arrival),
        (None, Some(departure)) => (StopEvent::Departure, departure),
        (None, None) => {
            return Err(BoardError::MissingEventTime {
                id: visit.id.clone(),
            });
        }
    };

    let prediction = resolve_prediction(visit, predictions);

    let (predicted, uncertainty) = match (event, prediction) {
        (StopEvent::Arrival, Some(p)) => (p.arrival_time, p.arrival_uncertainty),
        (StopEvent::Departure, Some(p)) => (p.departure_time, p.departure_uncertainty),
        (_, None) => (None, None),
    };

    let expected = predicted.unwrap_or(scheduled);

    Ok(ResolvedTiming {
        event,
        scheduled,
        expected,
        delay: expected - scheduled,
        time_remaining: expected - now,
        uncertainty,
    })
}

/// Look up the visit's prediction, enforcing that it belongs to the same
/// trip and stop. Failure to resolve is recovered locally, never fatal.
fn resolve_prediction<'a>(
    visit: &ScheduleRecord,
    predictions: &'a HashMap<String, PredictionRecord>,
) -> Option<&'a PredictionRecord> {
    let prediction_id = visit.prediction_ref.as_deref()?;

    let Some(prediction) = predictions.get(prediction_id) else {
        debug!(
            schedule_id = %visit.id,
            prediction_id,
            "prediction reference did not resolve, using scheduled time"
        );
        return None;
    };

    if prediction.trip_id != visit.trip_id || prediction.stop_id != visit.stop_id {
        debug!(
            schedule_id = %visit.id,
            prediction_id,
            "prediction belongs to a different trip or stop, using scheduled time"
        );
        return None;
    }

    Some(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, h, m, 0).unwrap()
    }

    fn visit(
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
        prediction_ref: Option<&str>,
    ) -> ScheduleRecord {
        ScheduleRecord {
            id: "s1".to_string(),
            route_id: "Red".to_string(),
            trip_id: "t1".to_string(),
            stop_id: "A1".to_string(),
            arrival_time: arrival,
            departure_time: departure,
            direction_id: 0,
            stop_sequence: 1,
            prediction_ref: prediction_ref.map(str::to_string),
        }
    }

    fn prediction(
        id: &str,
        trip: &str,
        stop: &str,
        arrival: Option<DateTime<Utc>>,
        departure: Option<DateTime<Utc>>,
    ) -> PredictionRecord {
        PredictionRecord {
            id: id.to_string(),
            stop_id: stop.to_string(),
            trip_id: trip.to_string(),
            arrival_time: arrival,
            arrival_uncertainty: None,
            departure_time: departure,
            departure_uncertainty: None,
        }
    }

    #[test]
    fn no_prediction_falls_back_to_schedule() {
        let v = visit(None, Some(at(8, 0)), None);

        let timing = resolve_timing(&v, &HashMap::new(), at(7, 50)).unwrap();

        assert_eq!(timing.event, StopEvent::Departure);
        assert_eq!(timing.expected, at(8, 0));
        assert_eq!(timing.delay, Duration::zero());
        assert_eq!(timing.time_remaining, Duration::minutes(10));
    }

    #[test]
    fn arrival_takes_precedence_over_departure() {
        let v = visit(Some(at(8, 10)), Some(at(8, 11)), None);

        let timing = resolve_timing(&v, &HashMap::new(), at(8, 0)).unwrap();

        assert_eq!(timing.event, StopEvent::Arrival);
        assert_eq!(timing.scheduled, at(8, 10));
    }

    #[test]
    fn prediction_supersedes_schedule() {
        let v = visit(None, Some(at(8, 0)), Some("p1"));
        let predictions =
            HashMap::from([("p1".to_string(), prediction("p1", "t1", "A1", None, Some(at(8, 5))))]);

        let timing = resolve_timing(&v, &predictions, at(7, 50)).unwrap();

        assert_eq!(timing.expected, at(8, 5));
        assert_eq!(timing.delay, Duration::minutes(5));
        assert_eq!(timing.time_remaining, Duration::minutes(15));
    }

    #[test]
    fn null_predicted_field_falls_back() {
        // Prediction exists but has no departure forecast.
        let v = visit(None, Some(at(8, 0)), Some("p1"));
        let predictions =
            HashMap::from([("p1".to_string(), prediction("p1", "t1", "A1", Some(at(8, 2)), None))]);

        let timing = resolve_timing(&v, &predictions, at(7, 50)).unwrap();

        assert_eq!(timing.expected, at(8, 0));
        assert_eq!(timing.delay, Duration::zero());
    }

    #[test]
    fn unresolved_reference_is_recovered() {
        let v = visit(None, Some(at(8, 0)), Some("missing"));

        let timing = resolve_timing(&v, &HashMap::new(), at(7, 50)).unwrap();
        assert_eq!(timing.expected, at(8, 0));
    }

    #[test]
    fn mismatched_prediction_is_ignored() {
        let v = visit(None, Some(at(8, 0)), Some("p1"));

        // Same ID, different trip.
        let wrong_trip =
            HashMap::from([("p1".to_string(), prediction("p1", "t9", "A1", None, Some(at(8, 5))))]);
        let timing = resolve_timing(&v, &wrong_trip, at(7, 50)).unwrap();
        assert_eq!(timing.expected, at(8, 0));

        // Same ID, different stop.
        let wrong_stop =
            HashMap::from([("p1".to_string(), prediction("p1", "t1", "B1", None, Some(at(8, 5))))]);
        let timing = resolve_timing(&v, &wrong_stop, at(7, 50)).unwrap();
        assert_eq!(timing.expected, at(8, 0));
    }

    #[test]
    fn early_trips_have_negative_delay() {
        let v = visit(None, Some(at(8, 0)), Some("p1"));
        let predictions =
            HashMap::from([("p1".to_string(), prediction("p1", "t1", "A1", None, Some(at(7, 58))))]);

        let timing = resolve_timing(&v, &predictions, at(7, 50)).unwrap();
        assert_eq!(timing.delay, Duration::minutes(-2));
    }

    #[test]
    fn past_departures_have_negative_remaining() {
        let v = visit(None, Some(at(8, 0)), None);

        let timing = resolve_timing(&v, &HashMap::new(), at(8, 30)).unwrap();
        assert_eq!(timing.time_remaining, Duration::minutes(-30));
    }

    #[test]
    fn uncertainty_is_carried_but_inert() {
        let v = visit(None, Some(at(8, 0)), Some("p1"));
        let mut p = prediction("p1", "t1", "A1", None, Some(at(8, 5)));
        p.departure_uncertainty = Some(120);
        let predictions = HashMap::from([("p1".to_string(), p)]);

        let timing = resolve_timing(&v, &predictions, at(7, 50)).unwrap();
        assert_eq!(timing.uncertainty, Some(120));
        assert_eq!(timing.expected, at(8, 5));
    }

    #[test]
    fn missing_both_times_is_malformed() {
        let v = visit(None, None, None);

        let err = resolve_timing(&v, &HashMap::new(), at(8, 0)).unwrap_err();
        assert_eq!(
            err,
            BoardError::MissingEventTime {
                id: "s1".to_string()
            }
        );
    }
}
