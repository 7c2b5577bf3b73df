//! Domain layer for the Employee Directory backend.
//!
//! This crate contains:
//! - Domain models (Employee and its create/update/filter payloads)
//! - Domain error types

pub mod errors;
pub mod models;
