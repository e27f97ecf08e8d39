//! API route definitions

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers::*;

/// Create the main API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health and status routes
        .route("/health", get(health_check))
        // Explorer routes
        .route("/api/search", post(search))
        .route("/api/graph", get(graph_data))
        // Apply middleware
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
