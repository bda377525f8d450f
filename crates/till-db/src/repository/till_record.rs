//! # Daily Till Record Repository
//!
//! Stores exactly one cash-count record per calendar date.
//!
//! ## Upsert Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  INSERT (date, created_at = now, totals, counts)                       │
//! │    ON CONFLICT (date) DO UPDATE SET                                    │
//! │        every column except id, date, created_at = excluded.<column>    │
//! │    RETURNING the stored row                                            │
//! │                                                                         │
//! │  One statement, one implicit transaction: SQLite takes the write lock  │
//! │  up front, so concurrent writers queue on busy_timeout instead of      │
//! │  failing a read-to-write lock upgrade. Any error leaves the row as it  │
//! │  was. Same-date writers: last commit wins.                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every submission replaces the whole row: a denomination left out of the
//! submission is stored as zero, and a missing expected figure as NULL.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteArguments, SqlitePool};
use sqlx::Sqlite;
use tracing::{debug, info};

use crate::error::DbResult;
use till_core::{DailyTillRecord, FloatCounts, Money, TillCounts, TillSubmission};

type RecordQuery<'q> = sqlx::query::QueryAs<'q, Sqlite, TillRecordRow, SqliteArguments<'q>>;

// =============================================================================
// SQL
// =============================================================================

const RECORD_COLUMNS: &str = r#"
    id, date, created_at,
    total_cash_cents, float_total_cents, takings_cents, expected_takings_cents,
    note50_count, note20_count, note10_count, note5_count,
    coin200_count, coin100_count, coin50_count, coin20_count,
    coin10_count, coin5_count, coin2_count, coin1_count,
    float_note20_count, float_note10_count, float_note5_count,
    float_coin200_count, float_coin100_count, float_coin50_count, float_coin20_count,
    float_coin10_count, float_coin5_count, float_coin2_count, float_coin1_count
"#;

// Column order after the totals follows `Denomination::ALL` then
// `Denomination::FLOAT`; `bind_figures` relies on it.
const UPSERT_SQL: &str = r#"
    INSERT INTO daily_till_records (
        date, created_at,
        total_cash_cents, float_total_cents, takings_cents, expected_takings_cents,
        note50_count, note20_count, note10_count, note5_count,
        coin200_count, coin100_count, coin50_count, coin20_count,
        coin10_count, coin5_count, coin2_count, coin1_count,
        float_note20_count, float_note10_count, float_note5_count,
        float_coin200_count, float_coin100_count, float_coin50_count, float_coin20_count,
        float_coin10_count, float_coin5_count, float_coin2_count, float_coin1_count
    ) VALUES (
        ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?
    )
    ON CONFLICT (date) DO UPDATE SET
        total_cash_cents = excluded.total_cash_cents,
        float_total_cents = excluded.float_total_cents,
        takings_cents = excluded.takings_cents,
        expected_takings_cents = excluded.expected_takings_cents,
        note50_count = excluded.note50_count,
        note20_count = excluded.note20_count,
        note10_count = excluded.note10_count,
        note5_count = excluded.note5_count,
        coin200_count = excluded.coin200_count,
        coin100_count = excluded.coin100_count,
        coin50_count = excluded.coin50_count,
        coin20_count = excluded.coin20_count,
        coin10_count = excluded.coin10_count,
        coin5_count = excluded.coin5_count,
        coin2_count = excluded.coin2_count,
        coin1_count = excluded.coin1_count,
        float_note20_count = excluded.float_note20_count,
        float_note10_count = excluded.float_note10_count,
        float_note5_count = excluded.float_note5_count,
        float_coin200_count = excluded.float_coin200_count,
        float_coin100_count = excluded.float_coin100_count,
        float_coin50_count = excluded.float_coin50_count,
        float_coin20_count = excluded.float_coin20_count,
        float_coin10_count = excluded.float_coin10_count,
        float_coin5_count = excluded.float_coin5_count,
        float_coin2_count = excluded.float_coin2_count,
        float_coin1_count = excluded.float_coin1_count
"#;

/// Binds the totals and all 23 counts of a submission, in column order.
fn bind_figures<'q>(query: RecordQuery<'q>, submission: &TillSubmission) -> RecordQuery<'q> {
    let mut query = query
        .bind(submission.total_cash.cents())
        .bind(submission.float_total.cents())
        .bind(submission.takings.cents())
        .bind(submission.expected_takings.map(|m| m.cents()));

    for (_, count) in submission.denominations.iter() {
        query = query.bind(count);
    }
    for (_, count) in submission.floats.iter() {
        query = query.bind(count);
    }
    query
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct TillRecordRow {
    id: i64,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    total_cash_cents: i64,
    float_total_cents: i64,
    takings_cents: i64,
    expected_takings_cents: Option<i64>,
    note50_count: i64,
    note20_count: i64,
    note10_count: i64,
    note5_count: i64,
    coin200_count: i64,
    coin100_count: i64,
    coin50_count: i64,
    coin20_count: i64,
    coin10_count: i64,
    coin5_count: i64,
    coin2_count: i64,
    coin1_count: i64,
    float_note20_count: i64,
    float_note10_count: i64,
    float_note5_count: i64,
    float_coin200_count: i64,
    float_coin100_count: i64,
    float_coin50_count: i64,
    float_coin20_count: i64,
    float_coin10_count: i64,
    float_coin5_count: i64,
    float_coin2_count: i64,
    float_coin1_count: i64,
}

impl From<TillRecordRow> for DailyTillRecord {
    fn from(row: TillRecordRow) -> Self {
        DailyTillRecord {
            id: row.id,
            date: row.date,
            created_at: row.created_at,
            total_cash: Money::from_cents(row.total_cash_cents),
            float_total: Money::from_cents(row.float_total_cents),
            takings: Money::from_cents(row.takings_cents),
            expected_takings: row.expected_takings_cents.map(Money::from_cents),
            denominations: TillCounts {
                note50: row.note50_count,
                note20: row.note20_count,
                note10: row.note10_count,
                note5: row.note5_count,
                coin200: row.coin200_count,
                coin100: row.coin100_count,
                coin50: row.coin50_count,
                coin20: row.coin20_count,
                coin10: row.coin10_count,
                coin5: row.coin5_count,
                coin2: row.coin2_count,
                coin1: row.coin1_count,
            },
            float_denominations: FloatCounts {
                float_note20: row.float_note20_count,
                float_note10: row.float_note10_count,
                float_note5: row.float_note5_count,
                float_coin200: row.float_coin200_count,
                float_coin100: row.float_coin100_count,
                float_coin50: row.float_coin50_count,
                float_coin20: row.float_coin20_count,
                float_coin10: row.float_coin10_count,
                float_coin5: row.float_coin5_count,
                float_coin2: row.float_coin2_count,
                float_coin1: row.float_coin1_count,
            },
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for daily till records.
#[derive(Debug, Clone)]
pub struct TillRecordRepository {
    pool: SqlitePool,
}

impl TillRecordRepository {
    /// Creates a new TillRecordRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TillRecordRepository { pool }
    }

    /// Creates or overwrites the record for `submission.date`.
    ///
    /// ## Returns
    /// The stored record as written by the same statement. On an overwrite
    /// `id` and `created_at` are those of the original insert.
    pub async fn upsert(&self, submission: &TillSubmission) -> DbResult<DailyTillRecord> {
        debug!(date = %submission.date, "Upserting till record");

        let sql = format!("{UPSERT_SQL} RETURNING {RECORD_COLUMNS}");
        let query = sqlx::query_as(&sql).bind(submission.date).bind(Utc::now());
        let row = bind_figures(query, submission).fetch_one(&self.pool).await?;
        let record = DailyTillRecord::from(row);

        info!(
            id = record.id,
            date = %record.date,
            takings = %record.takings,
            "Till record saved"
        );
        Ok(record)
    }

    /// Gets the record with the greatest date.
    pub async fn latest(&self) -> DbResult<Option<DailyTillRecord>> {
        debug!("Fetching latest till record");

        let sql =
            format!("SELECT {RECORD_COLUMNS} FROM daily_till_records ORDER BY date DESC LIMIT 1");
        let row: Option<TillRecordRow> = sqlx::query_as(&sql).fetch_optional(&self.pool).await?;

        Ok(row.map(DailyTillRecord::from))
    }

    /// Gets the record for one date.
    pub async fn get_by_date(&self, date: NaiveDate) -> DbResult<Option<DailyTillRecord>> {
        debug!(date = %date, "Fetching till record by date");

        let sql = format!("SELECT {RECORD_COLUMNS} FROM daily_till_records WHERE date = ?1");
        let row: Option<TillRecordRow> = sqlx::query_as(&sql)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(DailyTillRecord::from))
    }

    /// Looks up by date, or the latest record when no date is given.
    pub async fn find(&self, date: Option<NaiveDate>) -> DbResult<Option<DailyTillRecord>> {
        match date {
            Some(date) => self.get_by_date(date).await,
            None => self.latest().await,
        }
    }

    /// Counts stored records (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_till_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
