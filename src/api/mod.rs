//! HTTP API module
//! 
//! This module exposes countdown workers over WebSocket, one worker per
//! connection, alongside a health endpoint.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/worker", get(worker_socket_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
