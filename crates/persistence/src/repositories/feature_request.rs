//! Feature request repository.
//!
//! Holds every accepted feature request for the lifetime of the process.
//! Id assignment and append happen under one lock, so concurrent submissions
//! never share an id and never lose an append.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use domain::models::{FeatureRequest, NewFeatureRequest};

use crate::metrics::{record_store_size, OperationTimer};

/// Ordered records plus the id counter.
#[derive(Debug)]
struct StoreState {
    next_id: u64,
    requests: Vec<FeatureRequest>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            next_id: 1,
            requests: Vec::new(),
        }
    }

    /// Returns the next unused id and advances the counter.
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn append(&mut self, record: FeatureRequest) {
        self.requests.push(record);
    }

    fn all(&self) -> &[FeatureRequest] {
        &self.requests
    }
}

/// Repository for feature requests.
///
/// Cloning is cheap and every clone shares the same store.
#[derive(Debug, Clone)]
pub struct FeatureRequestRepository {
    state: Arc<Mutex<StoreState>>,
}

impl Default for FeatureRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureRequestRepository {
    /// Creates an empty store whose first id will be 1.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
        }
    }

    // A panic while holding the lock cannot leave the state half-written:
    // next_id and append never panic between them.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assigns an id, stamps `created_at` and `status`, and appends.
    pub fn insert(&self, new: NewFeatureRequest) -> FeatureRequest {
        let timer = OperationTimer::new("insert");
        let (record, len) = {
            let mut state = self.lock();
            let id = state.next_id();
            let record = new.into_feature_request(id, Utc::now());
            state.append(record.clone());
            (record, state.all().len())
        };
        timer.record();
        record_store_size(len);

        tracing::debug!(id = record.id, "Feature request stored");
        record
    }

    /// Returns a snapshot of all requests in insertion order.
    pub fn find_all(&self) -> Vec<FeatureRequest> {
        let timer = OperationTimer::new("find_all");
        let snapshot = self.lock().all().to_vec();
        timer.record();
        snapshot
    }

    /// Number of stored requests.
    pub fn count(&self) -> usize {
        self.lock().all().len()
    }
}
