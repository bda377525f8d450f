//! # Storage Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► ApiError::Persistence (till-server)
//!                               logged in full, client sees
//!                               {"error": "Database operation failed"}
//! ```
//!
//! A trigger or constraint that refuses a write surfaces as
//! [`DbError::QueryFailed`] with SQLite's message; the row is left untouched.

use thiserror::Error;

/// Failures of a storage operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// A `UNIQUE` constraint rejected the write.
    #[error("Duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// The database could not be opened, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Every connection stayed busy past the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                // SQLite: "UNIQUE constraint failed: daily_till_records.date"
                let constraint = db_err
                    .message()
                    .rsplit(": ")
                    .next()
                    .unwrap_or("unknown")
                    .to_string();
                DbError::UniqueViolation { constraint }
            }
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_variants() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn test_unique_violation_names_the_constraint() {
        let db = crate::Database::new(crate::DbConfig::in_memory()).await.unwrap();
        let insert = "INSERT INTO daily_till_records \
                      (date, created_at, total_cash_cents, float_total_cents, takings_cents) \
                      VALUES ('2025-06-01', '2025-06-01T17:00:00Z', 0, 0, 0)";

        sqlx::query(insert).execute(db.pool()).await.unwrap();
        let err: DbError = sqlx::query(insert)
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();

        match err {
            DbError::UniqueViolation { constraint } => {
                assert_eq!(constraint, "daily_till_records.date")
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }
}
