//! HTTP issue relay.
//!
//! Posts an [`IssuePayload`] as JSON to the configured tracker endpoint,
//! once, with a fixed timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::services::{IssuePayload, IssueRelay, RelayError, RelayReceipt};
use reqwest::{header, Client};
use serde::Deserialize;

use crate::config::RelayConfig;

/// Longest tracker response body kept in an error message.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Fields read back from a tracker's issue creation response.
#[derive(Debug, Deserialize)]
struct CreatedIssue {
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Relay that creates issues over HTTP.
pub struct HttpIssueRelay {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpIssueRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.url.trim().to_string(),
            token: config.bearer_token().map(str::to_string),
        })
    }

    /// Builds the relay when an endpoint is configured.
    pub fn from_config(
        config: &RelayConfig,
    ) -> Result<Option<Arc<dyn IssueRelay>>, reqwest::Error> {
        if !config.is_enabled() {
            return Ok(None);
        }
        let relay: Arc<dyn IssueRelay> = Arc::new(Self::new(config)?);
        Ok(Some(relay))
    }
}

fn map_send_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Transport(err.to_string())
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_LEN {
        let mut cut = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[async_trait]
impl IssueRelay for HttpIssueRelay {
    async fn create_issue(&self, payload: &IssuePayload) -> Result<RelayReceipt, RelayError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(payload);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: truncate(body),
            });
        }

        // Trackers differ in what they return; a missing or unparseable body
        // still counts as created.
        let issue_url = response
            .json::<CreatedIssue>()
            .await
            .ok()
            .and_then(|issue| issue.html_url.or(issue.url));

        Ok(RelayReceipt {
            status: status.as_u16(),
            issue_url,
        })
    }
}
