//! Backing store abstraction for employee records.
//!
//! [`EmployeeStore`] is the capability set the record gateway relies on:
//! insert, filtered find, find-one, find-one-and-update and delete-one, with
//! uniqueness and timestamps maintained by the store itself.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use domain::errors::EmployeeError;
use domain::models::{EmployeeField, EmployeeFilter, EmployeeUpdate, NewEmployee};
use thiserror::Error;

use crate::entities::EmployeeEntity;

pub use memory::InMemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

/// PostgreSQL SQLSTATE codes the store translates.
const UNIQUE_VIOLATION: &str = "23505";
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

/// Errors raised by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field {field}: {value}")]
    UniqueViolation { field: EmployeeField, value: String },

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies a driver error raised by a write that may have set `email`.
    pub fn from_write(err: sqlx::Error, email: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return StoreError::UniqueViolation {
                        field: EmployeeField::Email,
                        value: email.to_string(),
                    }
                }
                Some(NOT_NULL_VIOLATION) | Some(CHECK_VIOLATION) => {
                    return StoreError::Constraint(db_err.message().to_string())
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

impl From<StoreError> for EmployeeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { value, .. } => EmployeeError::duplicate_email(&value),
            StoreError::Constraint(msg) => EmployeeError::Validation(msg),
            StoreError::Database(err) => EmployeeError::Connectivity(err.to_string()),
        }
    }
}

/// Storage operations over the employee collection.
///
/// Implementations must enforce email uniqueness and maintain
/// `created_at`/`updated_at`; callers hold no state between calls.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a record, assigning its identifier and timestamps.
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeEntity, StoreError>;

    /// All records matching the filter, in storage order.
    async fn find(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeEntity>, StoreError>;

    /// The record with exactly this email, if any.
    async fn find_one(&self, email: &str) -> Result<Option<EmployeeEntity>, StoreError>;

    /// Apply a partial update to the record with this email and return the
    /// record as it is after the update. `None` means nothing matched.
    async fn find_one_and_update(
        &self,
        email: &str,
        update: &EmployeeUpdate,
    ) -> Result<Option<EmployeeEntity>, StoreError>;

    /// Delete the record with this email, returning the number removed.
    async fn delete_one(&self, email: &str) -> Result<u64, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
