//! Store metrics collection.
//!
//! Provides functions for recording store-related metrics.

use metrics::{gauge, histogram};
use std::time::Instant;

/// Record store operation duration.
pub fn record_operation_duration(operation: &str, duration_secs: f64) {
    histogram!(
        "store_operation_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// Record the number of stored feature requests.
pub fn record_store_size(len: usize) {
    gauge!("feature_requests_stored").set(len as f64);
}

/// A helper to time store operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = OperationTimer::new("insert");
/// let record = state.append(..);
/// timer.record();
/// ```
pub struct OperationTimer {
    operation: &'static str,
    start: Instant,
}

impl OperationTimer {
    /// Create a new timer for the given operation name.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_operation_duration(self.operation, duration);
    }
}
