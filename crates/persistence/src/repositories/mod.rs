//! Repository implementations for database operations.

pub mod employee;

pub use employee::EmployeeRepository;
