//! # Schema Migrations
//!
//! The SQL files under `migrations/sqlite/` are compiled into the binary, so
//! a fresh `till.db` gets its table on first start with nothing to install.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_daily_till_records.sql   one row per day, UNIQUE(date)
//! ```
//!
//! sqlx records what has run in `_sqlx_migrations`. Files that have shipped
//! are never edited; schema changes go in a new `NNN_*.sql`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Migrations from the workspace `migrations/sqlite` directory, embedded at
/// compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whatever has not run yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying migrations");

    MIGRATOR.run(pool).await?;
    Ok(())
}

/// `(embedded, applied)` counts, printed by the seed binary.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();

        let (total, applied) = super::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(applied, 1);
    }
}
