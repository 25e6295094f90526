//! Repository implementations.

pub mod feature_request;

pub use feature_request::FeatureRequestRepository;
