//! Route table and middleware stack

use crate::handlers::{scan_batch, scan_single};
use crate::health::health;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Router,
};
use condscan_rule_engine::RuleEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: &'static RuleEngine,
    /// Batches at or above this size are scanned with `spawn_blocking`
    pub blocking_batch_threshold: usize,
}

impl AppState {
    pub fn new(blocking_batch_threshold: usize) -> Self {
        Self {
            engine: RuleEngine::global(),
            blocking_batch_threshold,
        }
    }
}

/// Build the application router
pub fn create_router(state: AppState, cors_enabled: bool, max_body_bytes: usize) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/remediate", post(scan_single))
        .route("/remediate-array", post(scan_batch))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if cors_enabled {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}
