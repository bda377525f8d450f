//! # till-db: Record Store for Till Counter
//!
//! Persists one [`DailyTillRecord`](till_core::DailyTillRecord) per trading
//! day in SQLite through sqlx.
//!
//! ```text
//!   till-server handlers
//!          │ TillSubmission / NaiveDate
//!          ▼
//!   TillRecordRepository  ── upsert: one transaction, last write wins
//!          │                 latest: greatest date
//!          │                 get_by_date: exact match
//!          ▼
//!   Database (SqlitePool) ── migrations embedded at compile time
//!          │
//!          ▼
//!   till.db : daily_till_records
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - The `Database` handle and its `DbConfig`
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The daily till record store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("till.db")).await?;
//!
//! let saved = db.till_records().upsert(&submission).await?;
//! let latest = db.till_records().latest().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, StorageTarget};

pub use repository::till_record::TillRecordRepository;
