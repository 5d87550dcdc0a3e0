//! API route definitions

use crate::handlers;
use crate::SharedState;
use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/stats/{username}", get(handlers::get_stats))
        .with_state(state)
        .layer(cors)
        .layer(CompressionLayer::new())
}
