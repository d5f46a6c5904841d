//! Catalog caching for route and stop lookups.
//!
//! Route and stop catalogs are static for the lifetime of a configured
//! journey, so they are fetched once and reused. The cache carries an
//! explicit TTL rather than living forever: a day-old catalog is refetched
//! on the next lookup. Schedules are live data and always pass through.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{RouteInfo, StopInfo};
use crate::mbta::{MbtaError, ScheduleDocument, TransitSource};

/// Configuration for the catalog cache.
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    /// TTL for cached catalogs.
    pub ttl: Duration,

    /// Maximum number of cached entries per catalog.
    pub max_capacity: u64,
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 64,
        }
    }
}

/// Transit source with cached route/stop catalogs.
///
/// Each configured journey owns its own instance; there is no cross-trip
/// sharing of the lazily-populated catalogs.
pub struct CachedMbtaClient<S> {
    source: S,

    /// Routes keyed by the display name they were looked up with.
    routes: MokaCache<String, Arc<RouteInfo>>,

    /// Stop catalogs keyed by route ID.
    stops: MokaCache<String, Arc<HashMap<String, StopInfo>>>,
}

impl<S: TransitSource> CachedMbtaClient<S> {
    /// Create a new cached client around a source.
    pub fn new(source: S, config: &CatalogCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            source,
            routes,
            stops,
        }
    }

    /// Look up a route, hitting the source only on a cache miss.
    pub async fn route_by_name(&self, name: &str) -> Result<RouteInfo, MbtaError> {
        if let Some(cached) = self.routes.get(name).await {
            return Ok((*cached).clone());
        }

        let route = self.source.route_by_name(name).await?;
        self.routes
            .insert(name.to_string(), Arc::new(route.clone()))
            .await;

        Ok(route)
    }

    /// Fetch a route's stop catalog, hitting the source only on a miss.
    pub async fn stops_for_route(
        &self,
        route_id: &str,
    ) -> Result<HashMap<String, StopInfo>, MbtaError> {
        if let Some(cached) = self.stops.get(route_id).await {
            return Ok((*cached).clone());
        }

        let stops = self.source.stops_for_route(route_id).await?;
        self.stops
            .insert(route_id.to_string(), Arc::new(stops.clone()))
            .await;

        Ok(stops)
    }

    /// Schedules are live data; never cached.
    pub async fn schedules(
        &self,
        route_id: &str,
        stop_ids: &[String],
        min_time: &str,
    ) -> Result<ScheduleDocument, MbtaError> {
        self.source.schedules(route_id, stop_ids, min_time).await
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop all cached catalogs, forcing refetches on the next lookups.
    pub fn invalidate_catalogs(&self) {
        self.routes.invalidate_all();
        self.stops.invalidate_all();
    }
}

impl<S: TransitSource> TransitSource for CachedMbtaClient<S> {
    fn route_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RouteInfo, MbtaError>> + Send {
        CachedMbtaClient::route_by_name(self, name)
    }

    fn stops_for_route(
        &self,
        route_id: &str,
    ) -> impl Future<Output = Result<HashMap<String, StopInfo>, MbtaError>> + Send {
        CachedMbtaClient::stops_for_route(self, route_id)
    }

    fn schedules(
        &self,
        route_id: &str,
        stop_ids: &[String],
        min_time: &str,
    ) -> impl Future<Output = Result<ScheduleDocument, MbtaError>> + Send {
        CachedMbtaClient::schedules(self, route_id, stop_ids, min_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how many times each operation hits it.
    struct CountingSource {
        route_hits: AtomicUsize,
        stop_hits: AtomicUsize,
        schedule_hits: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                route_hits: AtomicUsize::new(0),
                stop_hits: AtomicUsize::new(0),
                schedule_hits: AtomicUsize::new(0),
            }
        }
    }

    impl TransitSource for CountingSource {
        fn route_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<RouteInfo, MbtaError>> + Send {
            self.route_hits.fetch_add(1, Ordering::SeqCst);
            let route = RouteInfo {
                id: "Red".to_string(),
                name: name.to_string(),
                color: "DA291C".to_string(),
                vehicle_kind: VehicleKind::HeavyRail,
            };
            async move { Ok(route) }
        }

        fn stops_for_route(
            &self,
            _route_id: &str,
        ) -> impl Future<Output = Result<HashMap<String, StopInfo>, MbtaError>> + Send {
            self.stop_hits.fetch_add(1, Ordering::SeqCst);
            let stops = HashMap::from([(
                "Alewife".to_string(),
                StopInfo::standalone("place-alfcl"),
            )]);
            async move { Ok(stops) }
        }

        fn schedules(
            &self,
            _route_id: &str,
            _stop_ids: &[String],
            _min_time: &str,
        ) -> impl Future<Output = Result<ScheduleDocument, MbtaError>> + Send {
            self.schedule_hits.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(serde_json::from_str::<ScheduleDocument>(r#"{"data": []}"#).unwrap())
            }
        }
    }

    #[tokio::test]
    async fn catalogs_hit_source_once() {
        let cached = CachedMbtaClient::new(CountingSource::new(), &CatalogCacheConfig::default());

        let first = cached.route_by_name("Red Line").await.unwrap();
        let second = cached.route_by_name("Red Line").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.source().route_hits.load(Ordering::SeqCst), 1);

        cached.stops_for_route("Red").await.unwrap();
        cached.stops_for_route("Red").await.unwrap();
        assert_eq!(cached.source().stop_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn schedules_always_pass_through() {
        let cached = CachedMbtaClient::new(CountingSource::new(), &CatalogCacheConfig::default());
        let stop_ids = vec!["70061".to_string()];

        cached.schedules("Red", &stop_ids, "08:00").await.unwrap();
        cached.schedules("Red", &stop_ids, "08:00").await.unwrap();
        assert_eq!(cached.source().schedule_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch() {
        let cached = CachedMbtaClient::new(CountingSource::new(), &CatalogCacheConfig::default());

        cached.route_by_name("Red Line").await.unwrap();
        cached.invalidate_catalogs();
        cached.route_by_name("Red Line").await.unwrap();

        assert_eq!(cached.source().route_hits.load(Ordering::SeqCst), 2);
    }
}
