//! JSON API for feature requests.

use axum::{body::Bytes, extract::State};
use domain::models::{FeatureRequest, SubmitFeatureRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Submit a feature request.
///
/// POST /api/submit
///
/// The body is parsed as JSON regardless of the declared content type.
pub async fn submit_feature_request(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<FeatureRequest>, ApiError> {
    let submission: SubmitFeatureRequest = serde_json::from_slice(&body)?;
    let record = state.submissions.submit(submission).await?;

    Ok(ApiResponse::success(
        "Feature request submitted successfully",
        record,
    ))
}

/// List all feature requests in submission order.
///
/// GET /api/requests
pub async fn list_feature_requests(
    State(state): State<AppState>,
) -> ApiResponse<Vec<FeatureRequest>> {
    ApiResponse::success(
        "Feature requests retrieved successfully",
        state.submissions.list(),
    )
}

/// Fallback for unsupported methods on the JSON API.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
