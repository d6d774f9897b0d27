use crate::dispatch::RouteRequest;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{CommunityMetric, ListQuery, ListResponse, MetricForm, MetricUpdate, NewMetric};
use crate::routes;
use crate::state::AppState;
use axum::{
    http::{header, StatusCode},
    Json,
};
use chrono::Utc;

/// GET /community-metrics/ handler - List all metrics
///
/// Results are ordered by creation time. `limit` and `offset` page through
/// them; `total_count` is always the unpaged count.
#[utoipa::path(
    get,
    path = routes::METRICS_LIST,
    params(
        ("limit" = Option<u32>, Query, description = "Maximum number of results to return"),
        ("offset" = Option<u32>, Query, description = "Number of results to skip")
    ),
    responses(
        (status = 200, description = "List of metrics", body = ListResponse),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn index_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let query: ListQuery = req.query()?;
    let offset = query.offset.unwrap_or(0) as usize;

    let all = state.store.list_all().await;
    let total_count = all.len();
    let page = all.into_iter().skip(offset);
    let data: Vec<CommunityMetric> = match query.limit {
        Some(limit) => page.take(limit as usize).collect(),
        None => page.collect(),
    };

    tracing::info!(
        "Listed {} metrics (total: {}, limit: {:?}, offset: {})",
        data.len(),
        total_count,
        query.limit,
        offset
    );

    Ok((StatusCode::OK, Json(ListResponse { data, total_count })))
}

/// GET /community-metrics/create handler - Blank form with default values
#[utoipa::path(
    get,
    path = routes::METRICS_CREATE,
    responses(
        (status = 200, description = "Default values for a new metric", body = MetricForm)
    ),
    tag = "community-metrics"
)]
pub async fn create_handler(
    _state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<MetricForm>), ApiError> {
    Ok((StatusCode::OK, Json(MetricForm::default())))
}

/// POST /community-metrics/ handler - Create a metric
#[utoipa::path(
    post,
    path = routes::METRICS_LIST,
    request_body = NewMetric,
    responses(
        (status = 201, description = "Metric created", body = CommunityMetric),
        (status = 400, description = "Invalid JSON or field values", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn store_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<CommunityMetric>), ApiError> {
    let new: NewMetric = req.json()?;
    let metric = state.store.create(new, Utc::now()).await?;

    let id = metric.id.to_string();
    let location = state
        .routes
        .url_for(routes::SHOW_ROUTE, &[(routes::METRIC_PARAM, id.as_str())])?;

    tracing::info!("Created metric {} for organization {}", metric.id, metric.organization_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(metric)))
}

/// GET /community-metrics/{communityMetric} handler - Retrieve one metric
#[utoipa::path(
    get,
    path = routes::METRIC_ITEM,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    responses(
        (status = 200, description = "Metric found", body = CommunityMetric),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn show_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;

    match state.store.get(id).await {
        Some(metric) => Ok((StatusCode::OK, Json(metric))),
        None => {
            tracing::info!("Metric not found with id: {}", id);
            Err(ApiError::MetricNotFound(id))
        }
    }
}

/// GET /community-metrics/{communityMetric}/edit handler - Editable fields of one metric
#[utoipa::path(
    get,
    path = routes::METRIC_EDIT,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    responses(
        (status = 200, description = "Current values of the editable fields", body = MetricForm),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn edit_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<MetricForm>), ApiError> {
    let id = req.metric_id()?;
    let metric = state.store.get(id).await.ok_or(ApiError::MetricNotFound(id))?;
    Ok((StatusCode::OK, Json(MetricForm::from(&metric))))
}

/// PUT /community-metrics/{communityMetric} handler - Update a metric
#[utoipa::path(
    put,
    path = routes::METRIC_ITEM,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    request_body = MetricUpdate,
    responses(
        (status = 200, description = "Metric updated", body = CommunityMetric),
        (status = 400, description = "Invalid UUID, JSON or field values", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn update_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<CommunityMetric>), ApiError> {
    let id = req.metric_id()?;
    let update: MetricUpdate = req.json()?;
    let metric = state.store.update(id, update, Utc::now()).await?;

    tracing::info!("Updated metric {}", id);
    Ok((StatusCode::OK, Json(metric)))
}

/// DELETE /community-metrics/{communityMetric} handler - Delete a metric
#[utoipa::path(
    delete,
    path = routes::METRIC_ITEM,
    params(
        ("communityMetric" = String, Path, description = "UUID of the metric")
    ),
    responses(
        (status = 204, description = "Metric deleted"),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Metric not found", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn destroy_handler(state: &AppState, req: &RouteRequest) -> Result<StatusCode, ApiError> {
    let id = req.metric_id()?;
    state.store.delete(id).await?;

    tracing::info!("Deleted metric {}", id);
    Ok(StatusCode::NO_CONTENT)
}
