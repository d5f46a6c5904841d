//! Conversion from MBTA API DTOs to domain records.
//!
//! This is the extraction boundary: raw JSON:API resources are validated
//! and converted here, failing fast with an [`ExtractError`] when a
//! required field is missing, rather than letting loosely-shaped data
//! reach the board engine.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{PredictionRecord, RouteInfo, ScheduleRecord, StopInfo, TripRecord, VehicleKind};

use super::types::{
    IncludedResource, RouteResource, ScheduleDocument, ScheduleResource, StopsDocument,
};

/// Error during DTO to domain extraction.
///
/// Any of these means the payload was malformed; extraction never
/// silently drops a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A required attribute or relationship was missing
    #[error("missing required field: {field} on {resource} {id}")]
    MissingField {
        resource: &'static str,
        id: String,
        field: &'static str,
    },

    /// A timestamp failed to parse as RFC 3339
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// A route carried a GTFS type code outside the known range
    #[error("unknown route type {route_type} on route {route_id}")]
    UnknownRouteType { route_id: String, route_type: u8 },
}

fn missing(resource: &'static str, id: &str, field: &'static str) -> ExtractError {
    ExtractError::MissingField {
        resource,
        id: id.to_string(),
        field,
    }
}

/// Parse an RFC 3339 timestamp into UTC.
fn parse_time(s: &str) -> Result<DateTime<Utc>, ExtractError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ExtractError::InvalidTime(s.to_string()))
}

fn parse_opt_time(s: Option<&str>) -> Result<Option<DateTime<Utc>>, ExtractError> {
    s.map(parse_time).transpose()
}

/// Build a [`RouteInfo`] from a route resource.
///
/// `display_name` is the rider-facing name the route was looked up by;
/// it becomes the key the caller caches under.
pub fn route_info(display_name: &str, res: &RouteResource) -> Result<RouteInfo, ExtractError> {
    let route_type = res
        .attributes
        .route_type
        .ok_or_else(|| missing("route", &res.id, "type"))?;

    let vehicle_kind =
        VehicleKind::from_gtfs(route_type).ok_or_else(|| ExtractError::UnknownRouteType {
            route_id: res.id.clone(),
            route_type,
        })?;

    Ok(RouteInfo {
        id: res.id.clone(),
        name: display_name.to_string(),
        color: res
            .attributes
            .color
            .clone()
            .unwrap_or_else(|| "FFFFFF".to_string()),
        vehicle_kind,
    })
}

/// Build the stop-name → [`StopInfo`] map for a route.
///
/// Platform-level resources that appear as children of another stop are
/// folded into their parent's child set; only named stops become keys.
pub fn stop_map(doc: &StopsDocument) -> Result<HashMap<String, StopInfo>, ExtractError> {
    let mut stops = HashMap::with_capacity(doc.data.len());

    for res in &doc.data {
        let name = res
            .attributes
            .name
            .as_deref()
            .ok_or_else(|| missing("stop", &res.id, "name"))?;

        let child_stop_ids = res
            .relationships
            .as_ref()
            .and_then(|r| r.child_stops.as_ref())
            .map(|c| c.data.iter().map(|ident| ident.id.clone()).collect())
            .unwrap_or_default();

        stops.insert(
            name.to_string(),
            StopInfo {
                stop_id: res.id.clone(),
                child_stop_ids,
            },
        );
    }

    Ok(stops)
}

/// Schedule records for one trip, sorted ascending by stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSchedules {
    pub trip_id: String,
    pub visits: Vec<ScheduleRecord>,
}

/// The three mappings extracted from one schedules document.
///
/// `schedules` preserves the document's trip iteration order; the source
/// pre-sorts by earliest arrival, and the extractor relies on that rather
/// than re-sorting globally.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFeed {
    pub schedules: Vec<TripSchedules>,
    pub trips: HashMap<String, TripRecord>,
    pub predictions: HashMap<String, PredictionRecord>,
}

/// Extract a schedules document into domain records.
pub fn extract_feed(doc: &ScheduleDocument) -> Result<ExtractedFeed, ExtractError> {
    let mut trips = HashMap::new();
    let mut predictions = HashMap::new();

    for included in &doc.included {
        match included {
            IncludedResource::Trip {
                id,
                attributes,
                relationships,
            } => {
                let record = TripRecord {
                    id: id.clone(),
                    route_id: relationships
                        .as_ref()
                        .and_then(|r| r.route.data.as_ref())
                        .map(|ident| ident.id.clone())
                        .unwrap_or_default(),
                    direction_id: attributes
                        .direction_id
                        .ok_or_else(|| missing("trip", id, "direction_id"))?,
                    name: attributes.name.clone().unwrap_or_default(),
                    headsign: attributes
                        .headsign
                        .clone()
                        .ok_or_else(|| missing("trip", id, "headsign"))?,
                };
                trips.insert(id.clone(), record);
            }
            IncludedResource::Prediction {
                id,
                attributes,
                relationships,
            } => {
                let rels = relationships
                    .as_ref()
                    .ok_or_else(|| missing("prediction", id, "relationships"))?;
                let record = PredictionRecord {
                    id: id.clone(),
                    stop_id: rels
                        .stop
                        .data
                        .as_ref()
                        .map(|ident| ident.id.clone())
                        .ok_or_else(|| missing("prediction", id, "stop"))?,
                    trip_id: rels
                        .trip
                        .data
                        .as_ref()
                        .map(|ident| ident.id.clone())
                        .ok_or_else(|| missing("prediction", id, "trip"))?,
                    arrival_time: parse_opt_time(attributes.arrival_time.as_deref())?,
                    arrival_uncertainty: attributes.arrival_uncertainty,
                    departure_time: parse_opt_time(attributes.departure_time.as_deref())?,
                    departure_uncertainty: attributes.departure_uncertainty,
                };
                predictions.insert(id.clone(), record);
            }
        }
    }

    // Group by trip preserving first-seen order; trips arrive pre-sorted
    // by earliest arrival from the source.
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<ScheduleRecord>> = HashMap::new();

    for res in &doc.data {
        let record = schedule_record(res)?;
        grouped
            .entry(record.trip_id.clone())
            .or_insert_with(|| {
                order.push(record.trip_id.clone());
                Vec::new()
            })
            .push(record);
    }

    let schedules = order
        .into_iter()
        .map(|trip_id| {
            let mut visits = grouped.remove(&trip_id).unwrap_or_default();
            visits.sort_by_key(|v| v.stop_sequence);
            TripSchedules { trip_id, visits }
        })
        .collect();

    Ok(ExtractedFeed {
        schedules,
        trips,
        predictions,
    })
}

/// Validate and convert one schedule resource.
fn schedule_record(res: &ScheduleResource) -> Result<ScheduleRecord, ExtractError> {
    let rels = res
        .relationships
        .as_ref()
        .ok_or_else(|| missing("schedule", &res.id, "relationships"))?;

    let trip_id = rels
        .trip
        .data
        .as_ref()
        .map(|ident| ident.id.clone())
        .ok_or_else(|| missing("schedule", &res.id, "trip"))?;
    let stop_id = rels
        .stop
        .data
        .as_ref()
        .map(|ident| ident.id.clone())
        .ok_or_else(|| missing("schedule", &res.id, "stop"))?;
    let route_id = rels
        .route
        .data
        .as_ref()
        .map(|ident| ident.id.clone())
        .ok_or_else(|| missing("schedule", &res.id, "route"))?;

    let arrival_time = parse_opt_time(res.attributes.arrival_time.as_deref())?;
    let departure_time = parse_opt_time(res.attributes.departure_time.as_deref())?;
    if arrival_time.is_none() && departure_time.is_none() {
        return Err(missing("schedule", &res.id, "arrival_time/departure_time"));
    }

    Ok(ScheduleRecord {
        id: res.id.clone(),
        route_id,
        trip_id,
        stop_id,
        arrival_time,
        departure_time,
        direction_id: res
            .attributes
            .direction_id
            .ok_or_else(|| missing("schedule", &res.id, "direction_id"))?,
        stop_sequence: res
            .attributes
            .stop_sequence
            .ok_or_else(|| missing("schedule", &res.id, "stop_sequence"))?,
        prediction_ref: rels.prediction.data.as_ref().map(|ident| ident.id.clone()),
    })
}
