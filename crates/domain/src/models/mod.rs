//! Domain models.

pub mod feature_request;

pub use feature_request::{
    rejection_message, FeatureRequest, FeatureRequestStatus, NewFeatureRequest, ParsePriorityError,
    Priority, SubmitFeatureRequest,
};
