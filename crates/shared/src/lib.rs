//! Shared utilities and common types for the Employee Directory backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Validation error flattening for API responses

pub mod validation;
