//! API routing module
//!
//! # Structure
//!
//! - [`kitchen`] - kitchen operations (board, timers, item ops, printing)
//! - `/health` - liveness probe

pub mod kitchen;

use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::utils::ApiResponse;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(kitchen::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health - liveness probe
async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("ok"))
}
