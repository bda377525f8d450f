//! # till-server
//!
//! HTTP API for the end-of-day till count.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Web client                                                             │
//! │      │  JSON                                                            │
//! │      ▼                                                                  │
//! │  axum Router + TraceLayer                                               │
//! │      │                                                                  │
//! │      ├──► routes::records ──► till-core validation ──► till-db (SQLite) │
//! │      ├──► routes::summary ──► till-core prompt ──► dyn Summarizer       │
//! │      ├──► routes::float   ──► till-core float_plan                      │
//! │      └──► routes::health  ──► Database::health_check                    │
//! │                                                                         │
//! │  Any failure ──► ApiError ──► {"error": ...} / {"message": ...}         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod summarizer;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Builds the full application router.
///
/// ## Example
/// ```rust,ignore
/// let state = AppState::new(db, Arc::new(DisabledSummarizer));
/// let app = build_router(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::records::router())
        .merge(routes::summary::router())
        .merge(routes::float::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
