//! Data transfer objects for web responses.

use serde::Serialize;

use crate::tracker::{BoardSnapshot, NOTHING_SCHEDULED};

/// The board as served to clients.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// False until the first successful poll.
    pub ready: bool,

    /// Time remaining until the first departure, or "Nothing Scheduled".
    pub state: String,

    pub route: Option<RouteDto>,
    pub origin: Option<String>,
    pub destination: Option<String>,

    /// When the snapshot was computed (RFC 3339).
    pub computed_at: Option<String>,

    pub departures: Vec<DepartureDto>,
}

/// Route attributes for display.
#[derive(Debug, Serialize)]
pub struct RouteDto {
    pub id: String,
    pub name: String,
    /// Hex color with leading '#'.
    pub color: String,
    pub vehicle_kind: String,
}

/// One upcoming departure.
#[derive(Debug, Serialize)]
pub struct DepartureDto {
    pub trip_id: String,
    pub destination_label: String,
    /// RFC 3339.
    pub expected_time: String,
    pub delay: String,
    pub time_remaining: String,
}

impl BoardResponse {
    /// Response before any poll has succeeded.
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            state: NOTHING_SCHEDULED.to_string(),
            route: None,
            origin: None,
            destination: None,
            computed_at: None,
            departures: Vec::new(),
        }
    }

    /// Render a snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            ready: true,
            state: snapshot.state(),
            route: Some(RouteDto {
                id: snapshot.route.id.clone(),
                name: snapshot.route.name.clone(),
                color: format!("#{}", snapshot.route.color),
                vehicle_kind: snapshot.route.vehicle_kind.description().to_string(),
            }),
            origin: Some(snapshot.origin_name.clone()),
            destination: Some(snapshot.destination_name.clone()),
            computed_at: Some(snapshot.computed_at.to_rfc3339()),
            departures: snapshot
                .departures
                .iter()
                .map(|entry| DepartureDto {
                    trip_id: entry.trip_id.clone(),
                    destination_label: entry.destination_label.clone(),
                    expected_time: entry.expected_time.to_rfc3339(),
                    delay: entry.delay_text(),
                    time_remaining: entry.time_remaining_text(),
                })
                .collect(),
        }
    }
}
