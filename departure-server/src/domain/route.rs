//! Route metadata types.

use std::fmt;

use serde::Serialize;

/// The kind of vehicle serving a route, from the GTFS route type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleKind {
    LightRail,
    HeavyRail,
    CommuterRail,
    Bus,
    Ferry,
}

impl VehicleKind {
    /// Map a GTFS route type code to a vehicle kind.
    ///
    /// Returns `None` for codes outside the range the MBTA uses (0-4).
    pub fn from_gtfs(route_type: u8) -> Option<Self> {
        match route_type {
            0 => Some(VehicleKind::LightRail),
            1 => Some(VehicleKind::HeavyRail),
            2 => Some(VehicleKind::CommuterRail),
            3 => Some(VehicleKind::Bus),
            4 => Some(VehicleKind::Ferry),
            _ => None,
        }
    }

    /// Rider-facing description of the vehicle kind.
    pub fn description(&self) -> &'static str {
        match self {
            VehicleKind::LightRail => "Light Rail",
            VehicleKind::HeavyRail => "Heavy Rail",
            VehicleKind::CommuterRail => "Commuter Rail",
            VehicleKind::Bus => "Bus",
            VehicleKind::Ferry => "Ferry",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Static metadata for one route, fetched once and cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Route ID used in API filters (e.g. "Red", "CR-Fitchburg").
    pub id: String,

    /// Rider-facing route name this route was looked up by.
    pub name: String,

    /// Route color as a six-digit hex string without the leading '#'.
    pub color: String,

    /// Kind of vehicle serving the route.
    pub vehicle_kind: VehicleKind,
}
