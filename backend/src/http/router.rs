//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/heatmaps", get(handlers::get_heatmaps))
        .route("/heatmaps/widget-config", get(handlers::get_widget_config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{StatRing, TableCatalog};
    use parking_lot::RwLock;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(
            Arc::new(StatRing::new(16)),
            Arc::new(RwLock::new(TableCatalog::default())),
            256,
            chrono::Duration::minutes(1),
        );
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
