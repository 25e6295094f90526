//! Domain services.
//!
//! Services contain logic that operates on domain models without touching
//! transport or storage.

pub mod relay;

pub use relay::{IssuePayload, IssueRelay, MockIssueRelay, RelayError, RelayReceipt};
