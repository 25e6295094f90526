//! Shared utilities for the feature intake backend.
//!
//! This crate provides small helpers used across the other crates:
//! - Text normalization for submitted form values
//! - Custom `validator` functions

pub mod text;
pub mod validation;
