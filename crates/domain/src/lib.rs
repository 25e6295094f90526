//! Domain layer for the feature intake backend.
//!
//! This crate contains:
//! - Domain models (FeatureRequest, Priority, submission payloads)
//! - The issue relay abstraction and issue formatting

pub mod models;
pub mod services;
