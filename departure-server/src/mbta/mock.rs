//! Mock MBTA client for testing without API access.
//!
//! Serves pre-recorded JSON:API documents from a fixture directory as if
//! they were live responses: `routes.json`, `stops.json` and
//! `schedules.json`.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{RouteInfo, StopInfo};

use super::TransitSource;
use super::client::route_matches_name;
use super::convert;
use super::error::MbtaError;
use super::types::{RoutesDocument, ScheduleDocument, StopsDocument};

/// Mock transit source backed by JSON fixture files.
#[derive(Debug, Clone)]
pub struct MockMbtaClient {
    routes: RoutesDocument,
    stops: StopsDocument,
    schedules: ScheduleDocument,
}

fn load_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, MbtaError> {
    let path = dir.join(file);
    let json = std::fs::read_to_string(&path).map_err(|e| MbtaError::Api {
        status: 0,
        message: format!("failed to read {path:?}: {e}"),
    })?;

    serde_json::from_str(&json).map_err(|e| MbtaError::Json {
        message: format!("failed to parse {path:?}: {e}"),
        body: Some(json.chars().take(500).collect()),
    })
}

impl MockMbtaClient {
    /// Load fixture documents from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, MbtaError> {
        let dir = dir.as_ref();

        Ok(Self {
            routes: load_json(dir, "routes.json")?,
            stops: load_json(dir, "stops.json")?,
            schedules: load_json(dir, "schedules.json")?,
        })
    }
}

impl TransitSource for MockMbtaClient {
    fn route_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RouteInfo, MbtaError>> + Send {
        let result = self
            .routes
            .data
            .iter()
            .find(|r| route_matches_name(r, name))
            .ok_or_else(|| MbtaError::RouteNotFound(name.to_string()))
            .and_then(|res| Ok(convert::route_info(name, res)?));
        async move { result }
    }

    fn stops_for_route(
        &self,
        _route_id: &str,
    ) -> impl Future<Output = Result<HashMap<String, StopInfo>, MbtaError>> + Send {
        let result = convert::stop_map(&self.stops).map_err(MbtaError::from);
        async move { result }
    }

    /// Time and stop filters are ignored; mock data is static.
    fn schedules(
        &self,
        _route_id: &str,
        _stop_ids: &[String],
        _min_time: &str,
    ) -> impl Future<Output = Result<ScheduleDocument, MbtaError>> + Send {
        let doc = self.schedules.clone();
        async move { Ok(doc) }
    }
}
