//! Prometheus metrics handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics exporter
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("teleagent_dispatch_duration_seconds".to_string()),
            &[0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0],
        )?
        .install_recorder()?;

    // Describe metrics
    describe_counter!(
        "teleagent_calls_total",
        "Total number of call initiations that reached the dispatcher"
    );
    describe_counter!(
        "teleagent_calls_failed",
        "Total number of call initiations the dispatcher failed or timed out"
    );
    describe_histogram!(
        "teleagent_dispatch_duration_seconds",
        "Time spent waiting for the dispatcher"
    );
    describe_counter!(
        "teleagent_credential_cleanup_failures",
        "Credential files that could not be removed"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}
