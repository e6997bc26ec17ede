use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use log::info;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeRecord};

pub mod postgres;
#[cfg(test)]
pub mod memory;

/// Persistence for employee documents.
///
/// Lookups that find nothing return `Ok(None)`; `Err` is reserved for store failures.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError>;
    async fn insert(&self, record: EmployeeRecord) -> Result<Employee, AppError>;
    /// Writes every mutable field of `employee` back to its document.
    async fn save(&self, employee: &Employee) -> Result<Option<Employee>, AppError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Opens the connection pool and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let statement_timeout = format!("{}s", config.statement_timeout().as_secs());
    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Connected to the employee store");

    Ok(pool)
}
