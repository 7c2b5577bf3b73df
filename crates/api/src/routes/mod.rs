//! HTTP route handlers.

pub mod employees;
pub mod health;
