use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::IssueRelay;
use persistence::repositories::FeatureRequestRepository;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{feature_requests, frontend, health, htmx};
use crate::services::SubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionService,
}

/// Builds the router.
///
/// `relay` is `None` when no issue tracker is configured.
pub fn create_app(
    config: Config,
    repository: FeatureRequestRepository,
    relay: Option<Arc<dyn IssueRelay>>,
) -> Router {
    let state = AppState {
        submissions: SubmissionService::new(repository, relay),
    };

    // JSON API, wrong methods answered with the JSON envelope
    let api_routes = Router::new()
        .route(
            "/api/submit",
            post(feature_requests::submit_feature_request)
                .fallback(feature_requests::method_not_allowed),
        )
        .route(
            "/api/requests",
            get(feature_requests::list_feature_requests)
                .fallback(feature_requests::method_not_allowed),
        );

    // HTMX fragments, wrong methods answered with an HTML fragment
    let htmx_routes = Router::new()
        .route(
            "/htmx/submit",
            post(htmx::submit_form).fallback(htmx::method_not_allowed),
        )
        .route(
            "/htmx/requests",
            get(htmx::list_requests).fallback(htmx::method_not_allowed),
        )
        .route("/htmx/form", get(htmx::reset_form));

    let public_routes = Router::new()
        .route("/", get(frontend::index))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(htmx_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
