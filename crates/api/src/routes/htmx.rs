//! HTMX fragment endpoints.
//!
//! Same submission pipeline as the JSON API, answered with small HTML
//! fragments that the page swaps in place.

use std::fmt::Write;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};
use domain::models::{FeatureRequest, SubmitFeatureRequest};
use html_escape::encode_safe;

use crate::app::AppState;
use crate::services::SubmitError;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type Fragment = (StatusCode, Html<String>);

fn error_fragment(status: StatusCode, message: &str) -> Fragment {
    (
        status,
        Html(format!(
            r#"<div class="error-message">{}</div>"#,
            encode_safe(message)
        )),
    )
}

/// Submit the HTML form.
///
/// POST /htmx/submit
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<SubmitFeatureRequest>, FormRejection>,
) -> Fragment {
    let Form(submission) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected form body");
            return error_fragment(StatusCode::BAD_REQUEST, "Error parsing form data");
        }
    };

    match state.submissions.submit(submission).await {
        Ok(record) => (
            StatusCode::OK,
            Html(format!(
                r#"<div class="success-message">Feature request submitted successfully! ID: {}</div>"#,
                record.id
            )),
        ),
        Err(SubmitError::Validation(message)) => {
            error_fragment(StatusCode::BAD_REQUEST, &message)
        }
        Err(err @ SubmitError::Relay { .. }) => {
            error_fragment(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

fn render_feature_item(out: &mut String, request: &FeatureRequest) {
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        r#"
<div class="feature-item">
    <div class="feature-title">{title}</div>
    <div class="feature-meta">
        ID: {id} | Priority: {priority} | Created: {created}
    </div>
    <div>{description}</div>
</div>"#,
        title = encode_safe(&request.title),
        id = request.id,
        priority = request.priority,
        created = request.created_at.format(CREATED_AT_FORMAT),
        description = encode_safe(&request.description),
    );
}

/// Render every stored request as a list fragment.
///
/// GET /htmx/requests
pub async fn list_requests(State(state): State<AppState>) -> Html<String> {
    let requests = state.submissions.list();
    if requests.is_empty() {
        return Html(
            r#"<div class="feature-item"><div>No feature requests found.</div></div>"#.to_string(),
        );
    }

    let mut out = String::new();
    for request in &requests {
        render_feature_item(&mut out, request);
    }
    Html(out)
}

/// Acknowledge a form reset.
///
/// GET /htmx/form
pub async fn reset_form() -> Html<&'static str> {
    Html("<div>Form reset successfully!</div>")
}

/// Fallback for unsupported methods on HTMX routes.
pub async fn method_not_allowed() -> Fragment {
    error_fragment(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
