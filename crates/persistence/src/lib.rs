//! Persistence layer for the Employee Directory backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Store implementations (PostgreSQL and in-memory)
//! - Repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;
