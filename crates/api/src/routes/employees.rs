//! Employee CRUD routes keyed by email.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{Employee, EmployeeFilter, EmployeeUpdate, NewEmployee};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::EmployeeBody;

/// Create an employee.
///
/// POST /employee
///
/// Responds 201 with the stored record, or 400 when a required field is
/// missing or the email is already taken.
pub async fn create_employee(
    State(state): State<AppState>,
    EmployeeBody(request): EmployeeBody<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let employee = state.repository.create(request).await?;

    info!(
        employee_id = %employee.id,
        email = %employee.email,
        "Employee created via API"
    );

    Ok((StatusCode::CREATED, Json(employee)))
}

/// List employees.
///
/// GET /employee
///
/// Optional `name`, `email` and `department` query parameters narrow the list
/// to exact matches.
pub async fn list_employees(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state.repository.list(&filter).await?;
    Ok(Json(employees))
}

/// Get one employee.
///
/// GET /employee/:email
pub async fn get_employee(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.repository.find_by_email(&email).await?;
    Ok(Json(employee))
}

/// Partially update an employee.
///
/// PUT /employee/:email
///
/// Only the fields present in the body change. Responds with the record as
/// stored after the update.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(email): Path<String>,
    EmployeeBody(update): EmployeeBody<EmployeeUpdate>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.repository.update_by_email(&email, update).await?;

    info!(
        employee_id = %employee.id,
        email = %email,
        "Employee updated via API"
    );

    Ok(Json(employee))
}

/// Delete an employee.
///
/// DELETE /employee/:email
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.repository.delete_by_email(&email).await?;

    info!(email = %email, "Employee deleted via API");

    Ok(StatusCode::NO_CONTENT)
}
