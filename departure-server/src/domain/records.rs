//! Normalized feed records: schedules, trips and predictions.
//!
//! These are the validated forms of the raw API resources. Every polling
//! cycle recomputes them from scratch; nothing here persists across cycles.

use chrono::{DateTime, Utc};

/// Which timetable event a stop visit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopEvent {
    Arrival,
    Departure,
}

/// One stop visit of one trip, from the static schedule.
///
/// Exactly one of `arrival_time`/`departure_time` may be absent: the first
/// stop of a trip has no arrival and the last has no departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub id: String,
    pub route_id: String,
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    pub direction_id: u8,
    pub stop_sequence: u32,
    /// ID of the live prediction superseding this visit, when one exists.
    pub prediction_ref: Option<String>,
}

/// Static metadata for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub id: String,
    pub route_id: String,
    pub direction_id: u8,
    /// Rider-facing trip name (train number on Commuter Rail, often empty
    /// on subway).
    pub name: String,
    /// Rider-facing destination label.
    pub headsign: String,
}

/// A live-updated forecast for one stop visit.
///
/// Any timestamp may be null, meaning there is no live forecast for that
/// event and the scheduled time stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub id: String,
    pub stop_id: String,
    pub trip_id: String,
    pub arrival_time: Option<DateTime<Utc>>,
    pub arrival_uncertainty: Option<i64>,
    pub departure_time: Option<DateTime<Utc>>,
    pub departure_uncertainty: Option<i64>,
}
