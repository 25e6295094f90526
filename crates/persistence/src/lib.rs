//! Persistence layer for the feature intake backend.
//!
//! This crate contains:
//! - The process-lifetime feature request store
//! - Store operation metrics

pub mod metrics;
pub mod repositories;
