//! # HTTP Routes
//!
//! ```text
//! POST /api/records            records::save
//! GET  /api/records/latest     records::latest
//! GET  /api/records?date=      records::by_date
//! POST /api/generate-summary   summary::generate
//! POST /api/float-suggestion   float::suggest
//! GET  /health                 health::check
//! ```
//!
//! Each module exposes a `router()`; [`crate::build_router`] merges them.

pub mod float;
pub mod health;
pub mod records;
pub mod summary;
