//! Connection wrapper.
//!
//! The application owns one connection pool. Read helpers map rows into typed
//! structs with `FromQueryResult`; the write helper returns the affected row
//! count. Every statement is parameterised and borrows a pooled connection
//! only for its own duration.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, FromQueryResult,
    Statement, Value,
};

use crate::config::Config;

/// Open the connection pool described by `config`.
///
/// # Errors
///
/// Returns the driver error when the database is unreachable or rejects the
/// credentials.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    match Database::connect(options).await {
        Ok(db) => {
            tracing::info!(url = %config.masked_database_url(), "Connected to MySQL");
            Ok(db)
        }
        Err(e) => {
            tracing::error!(url = %config.masked_database_url(), "Failed to connect to MySQL: {e}");
            Err(e)
        }
    }
}

/// Close every pooled connection.
pub async fn disconnect(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => tracing::info!("MySQL connection pool closed"),
        Err(e) => tracing::warn!("Error while closing MySQL pool: {e}"),
    }
}

/// Run a read statement and map every row into `T`.
///
/// # Errors
///
/// Propagates driver errors and column decoding failures.
pub async fn fetch_all<T, C>(db: &C, sql: &str, values: Vec<Value>) -> Result<Vec<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    let statement = Statement::from_sql_and_values(db.get_database_backend(), sql, values);
    let rows = db.query_all(statement).await.inspect_err(log_failure)?;

    rows.iter()
        .map(|row| T::from_query_result(row, ""))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(log_failure)
}

/// Run a read statement and map its first row, if any.
///
/// # Errors
///
/// Propagates driver errors and column decoding failures.
pub async fn fetch_one<T, C>(db: &C, sql: &str, values: Vec<Value>) -> Result<Option<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    let statement = Statement::from_sql_and_values(db.get_database_backend(), sql, values);
    let row = db.query_one(statement).await.inspect_err(log_failure)?;

    row.map(|row| T::from_query_result(&row, ""))
        .transpose()
        .inspect_err(log_failure)
}

/// Run a write statement (the connection auto-commits) and return the number
/// of affected rows.
///
/// # Errors
///
/// Propagates driver errors, including constraint violations.
pub async fn execute<C>(db: &C, sql: &str, values: Vec<Value>) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let statement = Statement::from_sql_and_values(db.get_database_backend(), sql, values);
    let result = db.execute(statement).await.inspect_err(log_failure)?;
    Ok(result.rows_affected())
}

#[derive(Debug, FromQueryResult)]
struct FloatScalar {
    value: Option<f64>,
}

/// Run a single-value aggregate aliased `value`. `None` when the aggregate is
/// `NULL` (no rows matched).
///
/// # Errors
///
/// Propagates driver errors and column decoding failures.
pub async fn fetch_f64<C>(db: &C, sql: &str, values: Vec<Value>) -> Result<Option<f64>, DbErr>
where
    C: ConnectionTrait,
{
    let row: Option<FloatScalar> = fetch_one(db, sql, values).await?;
    Ok(row.and_then(|r| r.value))
}

fn log_failure(e: &DbErr) {
    tracing::warn!("Statement failed: {e}");
}
