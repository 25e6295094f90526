use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;
use crate::services::submission::SubmitError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Relay(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::Relay(msg) => msg.clone(),
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }

        let body = ApiResponse::error(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!(error = %err, "Rejected JSON body");
        ApiError::Validation("Invalid JSON".to_string())
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(msg) => ApiError::Validation(msg),
            relay @ SubmitError::Relay { .. } => ApiError::Relay(relay.to_string()),
        }
    }
}
