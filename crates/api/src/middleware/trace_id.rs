//! Request tracing middleware.
//!
//! Tags every request with an id so log lines for one submission, including
//! its relay attempt, can be correlated.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware that extracts or generates a request ID.
///
/// Uses the incoming `X-Request-ID` header when present, otherwise a new
/// UUID v4. The id is stored in request extensions, attached to the request
/// span, and echoed in the response headers.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let start = std::time::Instant::now();
        let mut response = next.run(req).await;

        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        if let Ok(header_value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-request-id"), header_value);
        }

        response
    }
    .instrument(span)
    .await
}
