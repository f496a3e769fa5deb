//! Rates history DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for `GET /api/v1/rates/history`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Number of days to report, counting back from today (max 10).
    pub days: u32,
}
