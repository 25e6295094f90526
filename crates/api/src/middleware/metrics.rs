//! Prometheus metrics middleware.
//!
//! Provides HTTP request/response metrics collection and export.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Middleware to record HTTP request metrics.
///
/// Records the following metrics:
/// - `http_requests_total`: Counter with labels (method, path, status)
/// - `http_request_duration_seconds`: Histogram with labels (method, path)
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = method_to_str(req.method());
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}

/// Convert HTTP method to string for metric labels.
fn method_to_str(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

/// Count an accepted feature request.
pub fn record_feature_request_submitted() {
    counter!("feature_requests_submitted_total").increment(1);
}

/// Count a submission rejected by validation.
pub fn record_feature_request_rejected() {
    counter!("feature_requests_rejected_total").increment(1);
}

/// Count a relay attempt by outcome (`success` or `failure`).
pub fn record_relay_outcome(outcome: &'static str) {
    counter!("feature_request_relay_total", "outcome" => outcome).increment(1);
}

/// Handler for /metrics endpoint that returns Prometheus text format.
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        ),
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// Call once during startup before any metrics are recorded. Later calls are
/// no-ops.
pub fn init_metrics() -> Result<(), BuildError> {
    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(&[0.001, 0.005, 0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0])?
        .install_recorder()?;

    // Losing a race here only drops the second handle.
    let _ = PROMETHEUS_HANDLE.set(handle);
    Ok(())
}
