//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::EmployeeField;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the employees table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EmployeeEntity {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeEntity {
    /// Column backing a writable field.
    pub fn column(field: EmployeeField) -> &'static str {
        match field {
            EmployeeField::Name => "name",
            EmployeeField::Email => "email",
            EmployeeField::Department => "department",
        }
    }
}

impl From<EmployeeEntity> for domain::models::Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: entity.employee_id,
            name: entity.name,
            email: entity.email,
            department: entity.department,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
