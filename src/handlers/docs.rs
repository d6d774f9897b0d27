use crate::api_doc::ApiDoc;
use crate::dispatch::RouteRequest;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{http::StatusCode, Json};
use utoipa::OpenApi;

/// GET /api-docs/openapi.json handler - Serve the OpenAPI document
pub async fn api_docs_handler(
    _state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<utoipa::openapi::OpenApi>), ApiError> {
    Ok((StatusCode::OK, Json(ApiDoc::openapi())))
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{body_json, send, test_app, test_state};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_openapi_document_lists_metric_paths() {
        let app = test_app(test_state());

        let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc: serde_json::Value = body_json(response).await;
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/community-metrics/{communityMetric}"));
        assert!(paths.contains_key("/community-metrics/statistics"));
        assert!(paths.contains_key("/health"));
    }
}
