//! Application services.

pub mod issue_relay;
pub mod submission;

pub use issue_relay::HttpIssueRelay;
pub use submission::{SubmissionService, SubmitError};
