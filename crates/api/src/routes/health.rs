//! Health check endpoint handler.

/// Liveness probe.
///
/// GET /health
///
/// Always `200 OK` with body `OK`. Store and relay state are not checked.
pub async fn health_check() -> &'static str {
    "OK"
}
