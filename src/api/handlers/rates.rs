//! Currency rate endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::HistoryParams;
use crate::app_state::AppState;
use crate::domain::RateHistoryDay;
use crate::error::{ChatError, ErrorResponse};

/// `GET /rates/history` — EUR and USD rates for the last N days.
///
/// # Errors
///
/// Returns [`ChatError::InvalidRequest`] if `days` is missing, not a
/// number, or greater than 10.
#[utoipa::path(
    get,
    path = "/api/v1/rates/history",
    tag = "Rates",
    summary = "Currency rate history",
    description = "Returns PrivatBank EUR and USD sale/purchase rates for each of the last `days` days, newest first. Days the bank cannot answer report `null` rates.",
    params(HistoryParams),
    responses(
        (status = 200, description = "One entry per day", body = Vec<RateHistoryDay>),
        (status = 400, description = "Invalid or out of range `days`", body = ErrorResponse),
    )
)]
pub async fn rate_history(
    State(state): State<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<impl IntoResponse, ChatError> {
    let Query(params) = params.map_err(|err| ChatError::InvalidRequest(err.body_text()))?;
    let history = state.exchange.rate_history(params.days).await?;
    Ok(Json(history))
}

/// Rate routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rates/history", get(rate_history))
}
