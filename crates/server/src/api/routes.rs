use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{handlers, manifest, middleware::metrics_middleware, stremio};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Stremio clients fetch from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Addon protocol
        .route("/", get(manifest::landing_page))
        .route("/manifest.json", get(manifest::get_manifest))
        .route("/catalog/{type}/{id}", get(stremio::get_catalog))
        .route("/stream/{type}/{id}", get(stremio::get_streams))
        // Operations
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
