//! HTTP routes for the live dashboard.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::live_handler;

use super::handlers::{index, publish_update, status, AppState};

/// Creates the application router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        // GET /
        .route("/", get(index))
        // GET /live (WebSocket upgrade)
        .route("/live", get(live_handler))
        // GET /api/status
        .route("/api/status", get(status))
        // POST /api/lights/updates
        .route("/api/lights/updates", post(publish_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
