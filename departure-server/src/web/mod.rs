//! Web presentation layer.
//!
//! Serves the latest board snapshot as JSON; the poller publishes into
//! the shared state this module reads from.

mod dto;
mod routes;
mod state;

pub use dto::{BoardResponse, DepartureDto, RouteDto};
pub use routes::create_router;
pub use state::AppState;
