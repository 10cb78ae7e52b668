//! API Router configuration

use super::calls_handler::{health_check, initiate_call, setup_trunk, AppState};
use super::metrics_handler::metrics_handler;
use axum::{
    routing::{any, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route
    let health_routes = Router::new().route("/health", get(health_check));

    // Call routes; the call endpoint takes every verb and rejects non-POST itself
    let call_routes = Router::new()
        .route("/api/call", any(initiate_call))
        .route("/api/trunk/setup", post(setup_trunk));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(health_routes)
        .merge(call_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
