//! Float suggestion endpoint.

use std::collections::BTreeMap;

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use till_core::float_plan::suggest_float;
use till_core::{FloatCounts, TillCounts};

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/float-suggestion", post(suggest))
}

#[derive(Debug, Default, Deserialize)]
pub struct FloatRequest {
    #[serde(default)]
    pub denominations: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatResponse {
    pub floats: FloatCounts,
    pub float_total: f64,
    pub target: f64,
    /// `"exact"` or `"short"`
    pub outcome: &'static str,
    /// Zero when exact
    pub missing: f64,
}

/// `POST /api/float-suggestion`
///
/// Pure calculation over the counted till; nothing is read or stored.
pub async fn suggest(ApiJson(request): ApiJson<FloatRequest>) -> ApiResult<Json<FloatResponse>> {
    let till = TillCounts::from_map(&request.denominations)?;
    let plan = suggest_float(&till);

    Ok(Json(FloatResponse {
        floats: plan.counts,
        float_total: plan.total.to_decimal(),
        target: plan.target.to_decimal(),
        outcome: plan.outcome.as_str(),
        missing: plan.outcome.missing().to_decimal(),
    }))
}
