//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod employee;

pub use employee::EmployeeEntity;
