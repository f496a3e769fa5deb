//! OpenAPI document for the REST endpoints.

use utoipa::OpenApi;

use crate::api::dto::HealthResponse;
use crate::domain::{DailyRate, RateHistoryDay};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of `/health` and `/api/v1/*`.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::system::health_handler,
        crate::api::handlers::rates::rate_history,
    ),
    components(schemas(
        HealthResponse,
        DailyRate,
        RateHistoryDay,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Service status"),
        (name = "Rates", description = "Currency rates"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_history_path_and_schema() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/rates/history"));
        assert!(doc.paths.paths.contains_key("/health"));

        let Some(components) = doc.components else {
            panic!("no components");
        };
        assert!(components.schemas.contains_key("RateHistoryDay"));
        assert!(components.schemas.contains_key("DailyRate"));
    }

    #[test]
    fn document_serializes_to_json() {
        let Ok(json) = ApiDoc::openapi().to_json() else {
            panic!("openapi json");
        };
        assert!(json.contains("RateHistoryDay"));
    }
}
