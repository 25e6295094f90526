//! Issue relay for accepted feature requests.
//!
//! Provides the abstraction used to mirror a stored feature request into an
//! external issue tracker, plus the issue formatting shared by every
//! implementation.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FeatureRequest;

/// Label attached to every relayed issue.
pub const FEATURE_REQUEST_LABEL: &str = "feature-request";

/// Errors that can occur while relaying an issue.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    #[error("issue tracker unreachable: {0}")]
    Transport(String),

    #[error("issue tracker responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("issue tracker did not respond in time")]
    Timeout,
}

/// Issue creation payload sent to the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl IssuePayload {
    /// Builds the issue for a stored feature request.
    pub fn from_feature_request(request: &FeatureRequest) -> Self {
        Self {
            title: request.title.clone(),
            body: format_issue_body(request),
            labels: vec![
                FEATURE_REQUEST_LABEL.to_string(),
                format!("priority:{}", request.priority),
            ],
        }
    }
}

/// Outcome of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub status: u16,
    /// Link to the created issue, when the tracker returned one.
    pub issue_url: Option<String>,
}

/// Relay trait for creating issues in an external tracker.
#[async_trait::async_trait]
pub trait IssueRelay: Send + Sync {
    /// Create one issue. Exactly one attempt is made.
    async fn create_issue(&self, payload: &IssuePayload) -> Result<RelayReceipt, RelayError>;
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Format a feature request as a markdown issue body.
pub fn format_issue_body(request: &FeatureRequest) -> String {
    let components = request.affected_components.join(", ");
    let mut body = String::new();

    body.push_str("## Description\n\n");
    body.push_str(&request.description);
    body.push_str("\n\n");

    body.push_str("## Acceptance Criteria\n\n");
    body.push_str(&request.acceptance_criteria);
    body.push_str("\n\n");

    body.push_str("## Details\n\n");
    body.push_str(&format!("- **Priority:** {}\n", request.priority));
    body.push_str(&format!(
        "- **Target Timeline:** {}\n",
        or_placeholder(&request.target_timeline, "Not specified")
    ));
    body.push_str(&format!(
        "- **Affected Components:** {}\n\n",
        or_placeholder(&components, "None")
    ));

    body.push_str("## Example Usage\n\n");
    body.push_str(or_placeholder(&request.example_usage, "Not provided"));
    body.push_str("\n\n");

    body.push_str("## Technical Constraints\n\n");
    body.push_str(or_placeholder(&request.technical_constraints, "None"));
    body.push_str("\n\n");

    body.push_str("---\n");
    body.push_str(&format!(
        "Submitted {} (feature request #{})\n",
        request.created_at.to_rfc3339(),
        request.id
    ));

    body
}

/// In-memory relay for development and testing.
///
/// Records every payload it receives instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct MockIssueRelay {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    sent: Arc<Mutex<Vec<IssuePayload>>>,
}

impl MockIssueRelay {
    /// Create a new mock relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock relay that rejects every issue with a 500.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Payloads received so far, in order.
    pub fn sent(&self) -> Vec<IssuePayload> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl IssueRelay for MockIssueRelay {
    async fn create_issue(&self, payload: &IssuePayload) -> Result<RelayReceipt, RelayError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(payload.clone());
        }

        if self.simulate_failure {
            tracing::warn!(title = %payload.title, "Mock relay simulating failure");
            return Err(RelayError::Status {
                status: 500,
                body: "Simulated failure".to_string(),
            });
        }

        tracing::info!(title = %payload.title, "Mock: Would create issue");
        Ok(RelayReceipt {
            status: 201,
            issue_url: None,
        })
    }
}
