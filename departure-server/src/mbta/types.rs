//! MBTA V3 API response DTOs.
//!
//! These types map directly to the JSON:API documents the MBTA returns:
//! a `data` list of primary resources plus an `included` side-list of
//! related resources. Attribute fields are `Option` liberally; required
//! fields are validated in `convert`, not here, so that a malformed
//! record fails with a precise extraction error rather than an opaque
//! deserialization one.

use serde::Deserialize;

/// Reference to another resource by type and ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A nullable to-one relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToOne {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

/// A to-many relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToMany {
    #[serde(default)]
    pub data: Vec<ResourceIdentifier>,
}

/// Response from `GET /routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesDocument {
    pub data: Vec<RouteResource>,
}

/// One route resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: String,
    pub attributes: RouteAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteAttributes {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    /// Six-digit hex color, no leading '#'.
    pub color: Option<String>,
    /// GTFS route type: 0 light rail, 1 heavy rail, 2 commuter rail,
    /// 3 bus, 4 ferry.
    #[serde(rename = "type")]
    pub route_type: Option<u8>,
}

/// Response from `GET /stops?filter[route]=...&include=child_stops`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsDocument {
    pub data: Vec<StopResource>,
}

/// One stop resource (a station or a platform).
#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    pub id: String,
    pub attributes: StopAttributes,
    #[serde(default)]
    pub relationships: Option<StopRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopAttributes {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopRelationships {
    #[serde(default)]
    pub child_stops: Option<ToMany>,
}

/// Response from `GET /schedules?...&include=trip,prediction`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDocument {
    pub data: Vec<ScheduleResource>,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

/// One schedule resource: a stop visit of a trip.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResource {
    pub id: String,
    pub attributes: ScheduleAttributes,
    #[serde(default)]
    pub relationships: Option<ScheduleRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleAttributes {
    /// RFC 3339 timestamp; null at the first stop of a trip.
    pub arrival_time: Option<String>,
    /// RFC 3339 timestamp; null at the last stop of a trip.
    pub departure_time: Option<String>,
    pub direction_id: Option<u8>,
    pub stop_sequence: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleRelationships {
    #[serde(default)]
    pub route: ToOne,
    #[serde(default)]
    pub trip: ToOne,
    #[serde(default)]
    pub stop: ToOne,
    #[serde(default)]
    pub prediction: ToOne,
}

/// A resource in the `included` side-list, tagged by JSON:API type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum IncludedResource {
    #[serde(rename = "trip")]
    Trip {
        id: String,
        attributes: TripAttributes,
        #[serde(default)]
        relationships: Option<TripRelationships>,
    },
    #[serde(rename = "prediction")]
    Prediction {
        id: String,
        attributes: PredictionAttributes,
        #[serde(default)]
        relationships: Option<PredictionRelationships>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripAttributes {
    pub name: Option<String>,
    pub headsign: Option<String>,
    pub direction_id: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRelationships {
    #[serde(default)]
    pub route: ToOne,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionAttributes {
    pub arrival_time: Option<String>,
    pub arrival_uncertainty: Option<i64>,
    pub departure_time: Option<String>,
    pub departure_uncertainty: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRelationships {
    #[serde(default)]
    pub trip: ToOne,
    #[serde(default)]
    pub stop: ToOne,
}
