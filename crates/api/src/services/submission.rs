//! Feature request submission pipeline.
//!
//! Shared by the JSON API and the HTMX form so both paths validate, store,
//! and relay the same way. The record is stored before the relay is
//! attempted and is kept when the relay fails.

use std::sync::Arc;

use domain::models::{rejection_message, FeatureRequest, NewFeatureRequest, SubmitFeatureRequest};
use domain::services::{IssuePayload, IssueRelay, RelayError};
use persistence::repositories::FeatureRequestRepository;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::middleware::metrics::{
    record_feature_request_rejected, record_feature_request_submitted, record_relay_outcome,
};

/// Errors returned by [`SubmissionService::submit`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Nothing was stored.
    #[error("{0}")]
    Validation(String),

    /// The request was stored as `id`, but the tracker did not accept it.
    #[error("Feature request {id} was saved but could not be sent to the issue tracker: {source}")]
    Relay { id: u64, source: RelayError },
}

#[derive(Clone)]
pub struct SubmissionService {
    repository: FeatureRequestRepository,
    relay: Option<Arc<dyn IssueRelay>>,
}

impl SubmissionService {
    pub fn new(repository: FeatureRequestRepository, relay: Option<Arc<dyn IssueRelay>>) -> Self {
        Self { repository, relay }
    }

    pub fn relay_enabled(&self) -> bool {
        self.relay.is_some()
    }

    /// Validate, store, and (when configured) relay one submission.
    pub async fn submit(
        &self,
        submission: SubmitFeatureRequest,
    ) -> Result<FeatureRequest, SubmitError> {
        let new = NewFeatureRequest::try_from(submission).map_err(|errors| {
            record_feature_request_rejected();
            SubmitError::Validation(rejection_message(&errors))
        })?;

        let record = self.repository.insert(new);
        record_feature_request_submitted();
        info!(
            id = record.id,
            priority = %record.priority,
            components = record.affected_components.len(),
            "Feature request submitted"
        );

        let Some(relay) = &self.relay else {
            debug!(id = record.id, "Relay not configured, skipping");
            return Ok(record);
        };

        let payload = IssuePayload::from_feature_request(&record);
        match relay.create_issue(&payload).await {
            Ok(receipt) => {
                record_relay_outcome("success");
                info!(
                    id = record.id,
                    status = receipt.status,
                    issue_url = receipt.issue_url.as_deref().unwrap_or(""),
                    "Feature request relayed"
                );
                Ok(record)
            }
            Err(source) => {
                record_relay_outcome("failure");
                warn!(id = record.id, error = %source, "Feature request relay failed");
                Err(SubmitError::Relay {
                    id: record.id,
                    source,
                })
            }
        }
    }

    /// All stored requests in submission order.
    pub fn list(&self) -> Vec<FeatureRequest> {
        self.repository.find_all()
    }
}
