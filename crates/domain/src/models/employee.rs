//! Employee domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::errors::EmployeeError;

/// Writable employee attribute.
///
/// Used to express exact-match filters and partial updates without
/// resorting to open-ended maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeField {
    Name,
    Email,
    Department,
}

impl EmployeeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::Name => "name",
            EmployeeField::Email => "email",
            EmployeeField::Department => "department",
        }
    }
}

impl FromStr for EmployeeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(EmployeeField::Name),
            "email" => Ok(EmployeeField::Email),
            "department" => Ok(EmployeeField::Department),
            _ => Err(format!("Invalid employee field: {}", s)),
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Public representation of an employee.
///
/// This is the only shape handed to callers; storage column names never leak
/// past the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an employee.
///
/// Missing and `null` fields deserialize to empty strings so that
/// validation, rather than the decoder, reports which field is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Employee name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Employee email is required"))]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Employee department is required"))]
    pub department: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    /// Runs field validation, returning a `Validation` error naming every
    /// missing field.
    pub fn validated(self) -> Result<Self, EmployeeError> {
        self.validate()?;
        Ok(self)
    }
}

/// Request payload for a partial employee update.
///
/// Each field is independently present or absent; absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, message = "Employee name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Employee email cannot be empty"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Employee department cannot be empty"))]
    pub department: Option<String>,
}

impl EmployeeUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Returns true if no field is being changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.department.is_none()
    }

    /// Supplied fields paired with their new values, in declaration order.
    pub fn changes(&self) -> Vec<(EmployeeField, &str)> {
        collect_fields(&self.name, &self.email, &self.department)
    }

    pub fn validated(self) -> Result<Self, EmployeeError> {
        self.validate()?;
        Ok(self)
    }
}

/// Exact-match filter for listing employees.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl EmployeeFilter {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.department.is_none()
    }

    /// Constrained fields paired with the value they must equal.
    pub fn conditions(&self) -> Vec<(EmployeeField, &str)> {
        collect_fields(&self.name, &self.email, &self.department)
    }

    /// Returns true if every condition equals the corresponding value.
    pub fn matches(&self, name: &str, email: &str, department: &str) -> bool {
        self.conditions().into_iter().all(|(field, value)| match field {
            EmployeeField::Name => name == value,
            EmployeeField::Email => email == value,
            EmployeeField::Department => department == value,
        })
    }
}

fn collect_fields<'a>(
    name: &'a Option<String>,
    email: &'a Option<String>,
    department: &'a Option<String>,
) -> Vec<(EmployeeField, &'a str)> {
    [
        (EmployeeField::Name, name),
        (EmployeeField::Email, email),
        (EmployeeField::Department, department),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    .collect()
}
