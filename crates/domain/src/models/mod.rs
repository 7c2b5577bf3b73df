//! Domain models for the Employee Directory.

pub mod employee;

pub use employee::{Employee, EmployeeField, EmployeeFilter, EmployeeUpdate, NewEmployee};
