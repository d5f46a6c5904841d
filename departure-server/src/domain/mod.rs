//! Domain types for the departure board.
//!
//! This module contains the validated domain model for transit data.
//! Types here are produced by the extraction layer (`mbta::convert`) from
//! raw API documents; code that receives them can trust that required
//! fields are present.

mod clock;
mod records;
mod route;
mod stop;

pub use clock::{format_duration, now};
pub use records::{PredictionRecord, ScheduleRecord, StopEvent, TripRecord};
pub use route::{RouteInfo, VehicleKind};
pub use stop::StopInfo;
