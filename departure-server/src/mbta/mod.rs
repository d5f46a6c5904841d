//! MBTA V3 API client: the transit data source for the board.
//!
//! The V3 API speaks JSON:API: every response is a document with a `data`
//! list plus an `included` side-list of related resources. Schedules are
//! requested with `include=trip,prediction` so one fetch carries the
//! static timetable, the trip metadata and the live predictions, already
//! sorted by arrival time and filtered to the queried stops.

mod client;
pub mod convert;
mod error;
pub(crate) mod mock;
mod types;

use std::collections::HashMap;
use std::future::Future;

use crate::domain::{RouteInfo, StopInfo};

pub use client::{MbtaClient, MbtaConfig};
pub use convert::{ExtractError, ExtractedFeed, TripSchedules, extract_feed};
pub use error::MbtaError;
pub use mock::MockMbtaClient;
pub use types::{
    IncludedResource, ResourceIdentifier, RouteResource, RoutesDocument, ScheduleDocument,
    ScheduleResource, StopResource, StopsDocument,
};

/// The data-source contract the board depends on.
///
/// Implemented by the live client, the caching wrapper and the mock, so
/// the tracker can run against any of them.
pub trait TransitSource: Send + Sync {
    /// Look up a route by its rider-facing display name.
    fn route_by_name(&self, name: &str)
    -> impl Future<Output = Result<RouteInfo, MbtaError>> + Send;

    /// Fetch the stop catalog for a route, keyed by stop name.
    fn stops_for_route(
        &self,
        route_id: &str,
    ) -> impl Future<Output = Result<HashMap<String, StopInfo>, MbtaError>> + Send;

    /// Fetch schedules (with included trips and predictions) for a route,
    /// restricted to the given stop IDs, from `min_time` onward.
    fn schedules(
        &self,
        route_id: &str,
        stop_ids: &[String],
        min_time: &str,
    ) -> impl Future<Output = Result<ScheduleDocument, MbtaError>> + Send;
}
