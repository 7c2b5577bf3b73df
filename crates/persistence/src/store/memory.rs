//! In-process employee store.
//!
//! Keeps rows in insertion order behind a single lock. Used by tests and for
//! running the API without a database; it enforces the same unique-email and
//! timestamp rules as the PostgreSQL store.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::{EmployeeField, EmployeeFilter, EmployeeUpdate, NewEmployee};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::entities::EmployeeEntity;

#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    rows: RwLock<Vec<EmployeeEntity>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn duplicate_email(email: &str) -> StoreError {
    StoreError::UniqueViolation {
        field: EmployeeField::Email,
        value: email.to_string(),
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeEntity, StoreError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.email == employee.email) {
            return Err(duplicate_email(&employee.email));
        }

        let now = Utc::now();
        let entity = EmployeeEntity {
            employee_id: Uuid::new_v4(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn find(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeEntity>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| filter.matches(&row.name, &row.email, &row.department))
            .cloned()
            .collect())
    }

    async fn find_one(&self, email: &str) -> Result<Option<EmployeeEntity>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.email == email).cloned())
    }

    async fn find_one_and_update(
        &self,
        email: &str,
        update: &EmployeeUpdate,
    ) -> Result<Option<EmployeeEntity>, StoreError> {
        let mut rows = self.rows.write().await;

        let Some(index) = rows.iter().position(|row| row.email == email) else {
            return Ok(None);
        };

        if let Some(new_email) = update.email.as_deref() {
            let taken = rows
                .iter()
                .enumerate()
                .any(|(i, row)| i != index && row.email == new_email);
            if taken {
                return Err(duplicate_email(new_email));
            }
        }

        let row = &mut rows[index];
        for (field, value) in update.changes() {
            let target = match field {
                EmployeeField::Name => &mut row.name,
                EmployeeField::Email => &mut row.email,
                EmployeeField::Department => &mut row.department,
            };
            *target = value.to_string();
        }
        row.updated_at = Utc::now().max(row.created_at);

        Ok(Some(row.clone()))
    }

    async fn delete_one(&self, email: &str) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|row| row.email == email) {
            Some(index) => {
                rows.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
