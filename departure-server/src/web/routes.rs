//! HTTP route handlers.

use axum::{Json, Router, extract::State, routing::get};

use super::dto::BoardResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/board", get(board))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The latest departure board.
async fn board(State(state): State<AppState>) -> Json<BoardResponse> {
    match state.latest().await {
        Some(snapshot) => Json(BoardResponse::from_snapshot(&snapshot)),
        None => Json(BoardResponse::not_ready()),
    }
}
