//! # Repository Module
//!
//! Database repository implementations for the till counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.till_records().upsert(&submission)                         │
//! │       ▼                                                                 │
//! │  TillRecordRepository                                                  │
//! │  ├── upsert(&self, submission)                                         │
//! │  ├── latest(&self)                                                     │
//! │  ├── get_by_date(&self, date)                                          │
//! │  ├── find(&self, Option<date>)                                         │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite: daily_till_records                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`TillRecordRepository`](till_record::TillRecordRepository) - One cash-count record per day

pub mod till_record;
