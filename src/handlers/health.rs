use crate::dispatch::RouteRequest;
use crate::error::{ApiError, HealthResponse};
use crate::routes;
use crate::state::AppState;
use axum::{http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// The store is in-process, so the service is healthy whenever it can answer.
/// Reports the number of routes in the table.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<HealthResponse>), ApiError> {
    tracing::debug!("Health check passed");
    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            routes: state.routes.len(),
        }),
    ))
}
