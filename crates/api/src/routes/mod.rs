//! HTTP route handlers.

pub mod feature_requests;
pub mod frontend;
pub mod health;
pub mod htmx;
