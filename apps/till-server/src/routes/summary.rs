//! Summary endpoint.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use till_core::summary::SummaryRequest;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/generate-summary", post(generate))
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// `POST /api/generate-summary`
///
/// Nothing is stored; the text comes straight from the summarizer.
pub async fn generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let figures = request.into_figures()?;
    let summary = state.summarizer.summarize(&figures).await?;

    info!(
        takings = %figures.takings,
        performance = figures.performance().map(|p| p.as_str()).unwrap_or("n/a"),
        "Summary generated"
    );

    Ok(Json(SummaryResponse { summary }))
}
