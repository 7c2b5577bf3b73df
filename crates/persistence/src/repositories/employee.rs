//! Employee repository: normalized CRUD over an [`EmployeeStore`].

use domain::errors::EmployeeError;
use domain::models::{Employee, EmployeeFilter, EmployeeUpdate, NewEmployee};
use std::sync::Arc;
use tracing::{debug, info};

use crate::store::EmployeeStore;

/// Repository for employee records.
///
/// Holds no state besides the store handle; every call goes to the store and
/// every returned record is mapped to the public [`Employee`] shape.
#[derive(Clone)]
pub struct EmployeeRepository {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository over the given store.
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Create an employee. Fails with `Validation` if a required field is
    /// missing or the email is already taken.
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, EmployeeError> {
        let employee = employee.validated()?;
        let created = self.store.insert(&employee).await?;

        info!(
            employee_id = %created.employee_id,
            email = %created.email,
            "Employee created"
        );
        Ok(created.into())
    }

    /// List employees matching the filter. An empty filter lists everyone.
    pub async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, EmployeeError> {
        let employees = self.store.find(filter).await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees.into_iter().map(Employee::from).collect())
    }

    /// Find the employee with exactly this email.
    pub async fn find_by_email(&self, email: &str) -> Result<Employee, EmployeeError> {
        match self.store.find_one(email).await? {
            Some(entity) => Ok(entity.into()),
            None => {
                debug!(email = %email, "Employee not found");
                Err(EmployeeError::not_found(email))
            }
        }
    }

    /// Apply a partial update to the employee currently holding `email`.
    ///
    /// `email` identifies the target before the update; the payload may itself
    /// change the email. Not-found is decided by the update's own match, and
    /// the returned record is the store's post-update state.
    pub async fn update_by_email(
        &self,
        email: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, EmployeeError> {
        let update = update.validated()?;
        let updated = self
            .store
            .find_one_and_update(email, &update)
            .await?
            .ok_or_else(|| EmployeeError::not_found(email))?;

        info!(
            employee_id = %updated.employee_id,
            email = %email,
            fields = update.changes().len(),
            "Employee updated"
        );
        Ok(updated.into())
    }

    /// Delete the employee with this email.
    pub async fn delete_by_email(&self, email: &str) -> Result<(), EmployeeError> {
        let deleted = self.store.delete_one(email).await?;
        if deleted == 0 {
            return Err(EmployeeError::not_found(email));
        }

        info!(email = %email, "Employee deleted");
        Ok(())
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), EmployeeError> {
        Ok(self.store.ping().await?)
    }
}
