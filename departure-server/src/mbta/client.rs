//! MBTA V3 HTTP client.
//!
//! Handles authentication, status mapping and decoding of JSON:API
//! documents from the MBTA V3 API.

use std::collections::HashMap;
use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::{RouteInfo, StopInfo};

use super::TransitSource;
use super::convert;
use super::error::MbtaError;
use super::types::{RouteResource, RoutesDocument, ScheduleDocument, StopsDocument};

/// Default base URL for the MBTA V3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Configuration for the MBTA client.
///
/// Credentials are explicit constructor state; there is deliberately no
/// process-global API key.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MBTA V3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();

        // The V3 API authenticates with an x-api-key header. Requests
        // without one still work, at a much lower rate limit.
        if !config.api_key.is_empty() {
            let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| MbtaError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch and decode one JSON:API document.
    async fn get_document<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MbtaError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Look up a route by its rider-facing display name.
    pub async fn route_by_name(&self, name: &str) -> Result<RouteInfo, MbtaError> {
        let doc: RoutesDocument = self.get_document("/routes", &[]).await?;

        let resource = doc
            .data
            .iter()
            .find(|r| route_matches_name(r, name))
            .ok_or_else(|| MbtaError::RouteNotFound(name.to_string()))?;

        Ok(convert::route_info(name, resource)?)
    }

    /// Fetch the stop catalog for a route, keyed by stop name.
    pub async fn stops_for_route(
        &self,
        route_id: &str,
    ) -> Result<HashMap<String, StopInfo>, MbtaError> {
        let doc: StopsDocument = self
            .get_document(
                "/stops",
                &[
                    ("filter[route]", route_id.to_string()),
                    ("include", "child_stops".to_string()),
                ],
            )
            .await?;

        Ok(convert::stop_map(&doc)?)
    }

    /// Fetch the schedules document for a route and set of stop IDs from
    /// `min_time` (HH:MM, service-day local) onward.
    ///
    /// The API pre-sorts by arrival time and includes the related trip and
    /// prediction resources; the extractor relies on that ordering.
    pub async fn schedules(
        &self,
        route_id: &str,
        stop_ids: &[String],
        min_time: &str,
    ) -> Result<ScheduleDocument, MbtaError> {
        self.get_document(
            "/schedules",
            &[
                ("filter[route]", route_id.to_string()),
                ("filter[stop]", stop_ids.join(",")),
                ("filter[min_time]", min_time.to_string()),
                ("sort", "arrival_time".to_string()),
                ("include", "trip,prediction".to_string()),
            ],
        )
        .await
    }
}

/// Whether a route resource's long or short name matches a display name.
pub(crate) fn route_matches_name(resource: &RouteResource, name: &str) -> bool {
    let attrs = &resource.attributes;
    attrs
        .long_name
        .as_deref()
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
        || attrs
            .short_name
            .as_deref()
            .is_some_and(|n| !n.is_empty() && n.eq_ignore_ascii_case(name))
}

impl TransitSource for MbtaClient {
    fn route_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RouteInfo, MbtaError>> + Send {
        MbtaClient::route_by_name(self, name)
    }

    fn stops_for_route(
        &self,
        route_id: &str,
    ) -> impl Future<Output = Result<HashMap<String, StopInfo>, MbtaError>> + Send {
        MbtaClient::stops_for_route(self, route_id)
    }

    fn schedules(
        &self,
        route_id: &str,
        stop_ids: &[String],
        min_time: &str,
    ) -> impl Future<Output = Result<ScheduleDocument, MbtaError>> + Send {
        MbtaClient::schedules(self, route_id, stop_ids, min_time)
    }
}
