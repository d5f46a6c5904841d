use std::net::SocketAddr;
use std::time::Duration;

use departure_server::board::BoardConfig;
use departure_server::cache::{CachedMbtaClient, CatalogCacheConfig};
use departure_server::domain;
use departure_server::mbta::{MbtaClient, MbtaConfig};
use departure_server::tracker::{DepartureTracker, JourneyConfig};
use departure_server::web::{AppState, create_router};
use tracing::{error, info, warn};

/// Read an optional environment variable, parsed, falling back to a default.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Warning: {name} is not valid, using default.");
            default
        }),
        Err(_) => default,
    }
}

/// Read a required environment variable, exiting with a message if unset.
fn env_required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        eprintln!("Error: {name} must be set.");
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Credentials and journey from the environment
    let api_key = std::env::var("MBTA_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: MBTA_API_KEY not set. API calls may be rate limited.");
        String::new()
    });
    let journey = JourneyConfig {
        route: env_required("MBTA_ROUTE"),
        origin: env_required("MBTA_ORIGIN"),
        destination: env_required("MBTA_DESTINATION"),
    };

    let trips_limit: usize = env_or("TRIPS_LIMIT", 2);
    let offset_mins: i64 = env_or("DEPARTURE_OFFSET_MINS", 0);
    let poll_interval_secs: u64 = env_or("POLL_INTERVAL_SECS", 30);
    let bind_addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));

    // Create the MBTA client with a caching layer over the route and
    // stop catalogs
    let mbta_config = MbtaConfig::new(&api_key);
    let mbta_client = MbtaClient::new(mbta_config).expect("Failed to create MBTA client");
    let cached_mbta = CachedMbtaClient::new(mbta_client, &CatalogCacheConfig::default());

    let board_config = BoardConfig::new(trips_limit, offset_mins * 60);
    let tracker = DepartureTracker::new(cached_mbta, journey, board_config);

    let state = AppState::new();

    // Spawn the poller: refresh the board on an interval, keeping the
    // previous snapshot when a cycle fails.
    let poll_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_interval_secs));
        loop {
            interval.tick().await;
            match tracker.refresh(domain::now()).await {
                Ok(snapshot) => {
                    info!(
                        route = %snapshot.route.name,
                        departures = snapshot.departures.len(),
                        "refreshed departure board"
                    );
                    poll_state.publish(snapshot).await;
                }
                Err(e) => warn!("refresh failed, keeping previous board: {e}"),
            }
        }
    });

    let app = create_router(state);

    info!("Departure board listening on http://{bind_addr}");
    info!("  GET /health - Health check");
    info!("  GET /board  - Current departure board");

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
