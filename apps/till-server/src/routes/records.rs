//! Daily till record endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use till_core::validation::parse_record_date;
use till_core::{TillRecordView, TillSubmissionRequest};

use crate::error::{ApiError, ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/records", get(by_date).post(save))
        .route("/api/records/latest", get(latest))
}

/// Body of a successful save.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: &'static str,
    pub record: TillRecordView,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// The server's calendar date; used when a submission has none.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `POST /api/records`
///
/// Creates the day's record or replaces every field of the existing one.
pub async fn save(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TillSubmissionRequest>,
) -> ApiResult<Json<SavedResponse>> {
    let submission = request.into_submission(today())?;
    let record = state.db.till_records().upsert(&submission).await?;

    info!(date = %record.date, id = record.id, "Record saved");

    Ok(Json(SavedResponse {
        message: "Record saved successfully",
        record: TillRecordView::from(&record),
    }))
}

/// `GET /api/records/latest`
pub async fn latest(State(state): State<AppState>) -> ApiResult<Json<TillRecordView>> {
    state
        .db
        .till_records()
        .latest()
        .await?
        .map(|record| Json(TillRecordView::from(&record)))
        .ok_or_else(|| ApiError::not_found("No records found"))
}

/// `GET /api/records?date=YYYY-MM-DD`
///
/// Without a date this behaves like [`latest`].
pub async fn by_date(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> ApiResult<Json<TillRecordView>> {
    let date = match query.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_record_date(raw)?),
    };

    let found = state.db.till_records().find(date).await?;

    match (found, date) {
        (Some(record), _) => Ok(Json(TillRecordView::from(&record))),
        (None, Some(date)) => Err(ApiError::not_found(format!("No record found for {}", date))),
        (None, None) => Err(ApiError::not_found("No records found")),
    }
}
