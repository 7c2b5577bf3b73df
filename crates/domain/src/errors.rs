//! Domain error types.

use thiserror::Error;
use validator::ValidationErrors;

/// Failures surfaced by employee operations.
///
/// Messages for `Validation` and `NotFound` are shown to API callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// A required field is missing or a uniqueness constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// No record matched the given email.
    #[error("Employee with email: \"{email}\" not found")]
    NotFound { email: String },

    /// The backing store could not be reached or failed unexpectedly.
    #[error("Backing store error: {0}")]
    Connectivity(String),
}

impl EmployeeError {
    pub fn not_found(email: impl Into<String>) -> Self {
        EmployeeError::NotFound {
            email: email.into(),
        }
    }

    pub fn duplicate_email(email: &str) -> Self {
        EmployeeError::Validation(format!(
            "Employee with email: \"{}\" already exists",
            email
        ))
    }
}

impl From<ValidationErrors> for EmployeeError {
    fn from(errors: ValidationErrors) -> Self {
        EmployeeError::Validation(shared::validation::join_error_messages(&errors))
    }
}
