//! # Storage Handle
//!
//! Opens the SQLite file behind a connection pool and hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  main()                                                                 │
//! │    │  DbConfig::new(path).max_connections(n)                            │
//! │    ▼                                                                    │
//! │  Database::new(config) ──► open pool ──► apply migrations              │
//! │    │                                                                    │
//! │    │  clone into AppState (clones share one pool)                       │
//! │    ▼                                                                    │
//! │  handlers: db.till_records().upsert / latest / get_by_date             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  shutdown: db.close() ──► every later query fails with                  │
//! │            DbError::ConnectionFailed                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases run in WAL mode, so `GET` requests keep reading while a
//! save is committing. Writers wait on each other for up to `busy_timeout`.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::till_record::TillRecordRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    /// A database file, created on first use.
    File(PathBuf),
    /// A private database that disappears with the pool (tests).
    Memory,
}

/// Pool settings.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/till.db").max_connections(2);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub target: StorageTarget,

    /// Upper bound on open connections. Default: 5
    pub max_connections: u32,

    /// Connections kept open while idle. Default: 1
    pub min_connections: u32,

    /// How long a request waits for a free connection. Default: 30s
    pub acquire_timeout: Duration,

    /// How long a writer waits on SQLite's lock. Default: 5s
    pub busy_timeout: Duration,

    /// Apply pending migrations in [`Database::new`]. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed configuration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            target: StorageTarget::File(path.into()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// In-memory configuration.
    ///
    /// Every SQLite connection to `:memory:` opens its own empty database,
    /// so the pool is pinned to one connection that never idles out.
    pub fn in_memory() -> Self {
        DbConfig {
            target: StorageTarget::Memory,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.target == StorageTarget::Memory
    }

    /// The database file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            StorageTarget::File(path) => Some(path),
            StorageTarget::Memory => None,
        }
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = match &self.target {
            StorageTarget::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            StorageTarget::Memory => SqliteConnectOptions::new().in_memory(true),
        };
        options.busy_timeout(self.busy_timeout)
    }
}

// =============================================================================
// Database
// =============================================================================

/// The storage handle.
///
/// Built once at startup and cloned into the router state.
///
/// ```rust,ignore
/// async fn latest(State(state): State<AppState>) -> ApiResult<Json<TillRecordView>> {
///     let record = state.db.till_records().latest().await?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, applies migrations.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` when the file cannot be opened or created
    /// - `DbError::MigrationFailed` when the schema cannot be brought up to date
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        match config.path() {
            Some(path) => info!(path = %path.display(), "Opening till database"),
            None => info!("Opening in-memory till database"),
        }

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout);

        // An idle-reaped in-memory connection would take the data with it.
        if config.is_in_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. Already-applied ones are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }

    /// The raw pool, for the seed binary and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository for `daily_till_records`.
    pub fn till_records(&self) -> TillRecordRepository {
        TillRecordRepository::new(self.pool.clone())
    }

    /// Closes every connection. Clones of this handle are closed too.
    pub async fn close(&self) {
        info!("Closing till database");
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Runs `SELECT 1`; false when closed or unreachable.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());
        assert!(config.path().is_none());

        let db = Database::new(config).await.unwrap();
        assert!(db.health_check().await);
        assert_eq!(db.till_records().count().await.unwrap(), 0);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/till-test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert_eq!(config.path(), Some(Path::new("/tmp/till-test.db")));
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!("till-pool-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_till_records")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(reopened.health_check().await);
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_closed_database_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(db.is_closed());
        assert!(!db.health_check().await);
    }
}
