//! Shared application state.

use std::sync::Arc;

use till_db::Database;

use crate::summarizer::Summarizer;

/// Handed to every handler through `State`.
///
/// Both fields are cheap to clone: `Database` wraps a pool handle and the
/// summarizer sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(db: Database, summarizer: Arc<dyn Summarizer>) -> Self {
        AppState { db, summarizer }
    }
}
