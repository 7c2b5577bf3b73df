//! PostgreSQL employee store.

use async_trait::async_trait;
use domain::models::{EmployeeFilter, EmployeeUpdate, NewEmployee};
use sqlx::{Postgres, QueryBuilder};
use std::sync::Arc;

use super::{EmployeeStore, StoreError};
use crate::db::Database;
use crate::entities::EmployeeEntity;
use crate::metrics::{record_pool_metrics, QueryTimer};

const RETURNING_COLUMNS: &str =
    " RETURNING employee_id, name, email, department, created_at, updated_at";

fn insert_query(employee: &NewEmployee) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO employees (name, email, department) VALUES (");
    {
        let mut separated = builder.separated(", ");
        separated.push_bind(employee.name.clone());
        separated.push_bind(employee.email.clone());
        separated.push_bind(employee.department.clone());
    }
    builder.push(")");
    builder.push(RETURNING_COLUMNS);
    builder
}

/// Store backed by the `employees` table.
///
/// Every call goes through [`Database::ensure_connected`], so the pool is
/// opened by whichever operation needs it first.
#[derive(Clone)]
pub struct PgEmployeeStore {
    db: Arc<Database>,
}

impl PgEmployeeStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeEntity, StoreError> {
        let pool = self.db.ensure_connected().await?;
        let timer = QueryTimer::new("insert_employee");
        let result = insert_query(employee)
            .build_query_as::<EmployeeEntity>()
            .fetch_one(pool)
            .await;
        timer.finish(&result);
        result.map_err(|e| StoreError::from_write(e, &employee.email))
    }

    async fn find(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeEntity>, StoreError> {
        let pool = self.db.ensure_connected().await?;
        let timer = QueryTimer::new("find_employees");

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT employee_id, name, email, department, created_at, updated_at FROM employees",
        );
        let conditions = filter.conditions();
        if !conditions.is_empty() {
            builder.push(" WHERE ");
            let mut separated = builder.separated(" AND ");
            for (field, value) in conditions {
                separated.push(EmployeeEntity::column(field));
                separated.push_unseparated(" = ");
                separated.push_bind_unseparated(value.to_string());
            }
        }

        let result = builder
            .build_query_as::<EmployeeEntity>()
            .fetch_all(pool)
            .await;
        timer.finish(&result);
        Ok(result?)
    }

    async fn find_one(&self, email: &str) -> Result<Option<EmployeeEntity>, StoreError> {
        let pool = self.db.ensure_connected().await?;
        let timer = QueryTimer::new("find_employee_by_email");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT employee_id, name, email, department, created_at, updated_at
            FROM employees
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await;
        timer.finish(&result);
        Ok(result?)
    }

    async fn find_one_and_update(
        &self,
        email: &str,
        update: &EmployeeUpdate,
    ) -> Result<Option<EmployeeEntity>, StoreError> {
        let pool = self.db.ensure_connected().await?;
        let timer = QueryTimer::new("update_employee_by_email");

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE employees SET ");
        {
            let mut separated = builder.separated(", ");
            for (field, value) in update.changes() {
                separated.push(EmployeeEntity::column(field));
                separated.push_unseparated(" = ");
                separated.push_bind_unseparated(value.to_string());
            }
            // Refreshed even when no field changes
            separated.push("updated_at = NOW()");
        }
        builder.push(" WHERE email = ");
        builder.push_bind(email.to_string());
        builder.push(RETURNING_COLUMNS);

        let result = builder
            .build_query_as::<EmployeeEntity>()
            .fetch_optional(pool)
            .await;
        timer.finish(&result);

        let written_email = update.email.as_deref().unwrap_or(email);
        result.map_err(|e| StoreError::from_write(e, written_email))
    }

    async fn delete_one(&self, email: &str) -> Result<u64, StoreError> {
        let pool = self.db.ensure_connected().await?;
        let timer = QueryTimer::new("delete_employee_by_email");
        let result = sqlx::query("DELETE FROM employees WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.db.ensure_connected().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        record_pool_metrics(pool);
        Ok(())
    }
}
