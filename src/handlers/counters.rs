use crate::dispatch::RouteRequest;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{AmountRequest, CommunityMetric, UserRequest};
use crate::routes;
use crate::state::AppState;
use axum::{http::StatusCode, Json};
use chrono::Utc;

/// POST /community-metrics/{communityMetric}/add-user handler
///
/// Attaching a user that is already attached succeeds without change.
#[utoipa::path(
    post,
    path = routes::METRIC_ADD_USER,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User attached", body = CommunityMetric),
        (status = 400, description = "Invalid UUID, JSON or user id", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn add_user_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let UserRequest { user_id } = req.json()?;
    let metric = state.store.add_user(id, user_id.clone(), Utc::now()).await?;

    tracing::info!("Attached user {} to metric {}", user_id, id);
    Ok((StatusCode::OK, Json(metric)))
}

/// POST /community-metrics/{communityMetric}/remove-user handler
#[utoipa::path(
    post,
    path = routes::METRIC_REMOVE_USER,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User detached", body = CommunityMetric),
        (status = 400, description = "Invalid UUID or JSON", body = ErrorResponse),
        (status = 404, description = "Metric not found or user not attached", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn remove_user_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let UserRequest { user_id } = req.json()?;
    let metric = state.store.remove_user(id, user_id.clone(), Utc::now()).await?;

    tracing::info!("Detached user {} from metric {}", user_id, id);
    Ok((StatusCode::OK, Json(metric)))
}

/// POST /community-metrics/{communityMetric}/add-kwh-production handler
#[utoipa::path(
    post,
    path = routes::METRIC_ADD_KWH,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Production counter incremented", body = CommunityMetric),
        (status = 400, description = "Invalid UUID, JSON or amount", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn add_kwh_production_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let AmountRequest { amount } = req.json()?;
    let metric = state.store.add_kwh_production(id, amount, Utc::now()).await?;

    tracing::info!("Added {} kWh to metric {} (total {})", amount, id, metric.kwh_production);
    Ok((StatusCode::OK, Json(metric)))
}

/// POST /community-metrics/{communityMetric}/add-co2-avoided handler
#[utoipa::path(
    post,
    path = routes::METRIC_ADD_CO2,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Avoided-emissions counter incremented", body = CommunityMetric),
        (status = 400, description = "Invalid UUID, JSON or amount", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn add_co2_avoided_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let AmountRequest { amount } = req.json()?;
    let metric = state.store.add_co2_avoided(id, amount, Utc::now()).await?;

    tracing::info!("Added {} kg CO2 avoided to metric {} (total {})", amount, id, metric.co2_avoided_kg);
    Ok((StatusCode::OK, Json(metric)))
}

/// POST /community-metrics/{communityMetric}/reset-metrics handler
///
/// Zeroes both counters. Attached users and the active flag are kept.
#[utoipa::path(
    post,
    path = routes::METRIC_RESET,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    responses(
        (status = 200, description = "Counters reset", body = CommunityMetric),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn reset_metrics_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let metric = state.store.reset_counters(id, Utc::now()).await?;

    tracing::info!("Reset counters for metric {}", id);
    Ok((StatusCode::OK, Json(metric)))
}
