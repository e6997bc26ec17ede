use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use super::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeRecord};

const COLUMNS: &str =
    "id, name, email, mobile, designation, gender, courses, image, created_at";

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        let sql = format!("SELECT {} FROM employees ORDER BY created_at, id", COLUMNS);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let sql = format!("SELECT {} FROM employees WHERE email = $1 LIMIT 1", COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn insert(&self, record: EmployeeRecord) -> Result<Employee, AppError> {
        let sql = format!(
            "INSERT INTO employees (name, email, mobile, designation, gender, courses, image, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            COLUMNS
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.mobile)
            .bind(&record.designation)
            .bind(&record.gender)
            .bind(&record.courses)
            .bind(&record.image)
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn save(&self, employee: &Employee) -> Result<Option<Employee>, AppError> {
        let sql = format!(
            "UPDATE employees SET name = $2, email = $3, mobile = $4, designation = $5, \
             gender = $6, courses = $7, image = $8 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let saved = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee.id)
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(&employee.mobile)
            .bind(&employee.designation)
            .bind(&employee.gender)
            .bind(&employee.courses)
            .bind(&employee.image)
            .fetch_optional(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
