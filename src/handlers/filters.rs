use crate::dispatch::RouteRequest;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{CommunityMetric, ListResponse, StatisticsResponse};
use crate::routes;
use crate::state::AppState;
use axum::{http::StatusCode, Json};
use chrono::{Datelike, Duration, Utc};

fn listed(data: Vec<CommunityMetric>) -> (StatusCode, Json<ListResponse>) {
    let total_count = data.len();
    (StatusCode::OK, Json(ListResponse { data, total_count }))
}

/// GET /community-metrics/by-organization/{organizationId} handler
#[utoipa::path(
    get,
    path = routes::METRICS_BY_ORGANIZATION,
    params(
        ("organizationId" = String, Path, description = "Organization identifier")
    ),
    responses(
        (status = 200, description = "Metrics belonging to the organization", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn by_organization_handler(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let organization_id = req.param(routes::ORGANIZATION_PARAM)?;
    let data = state
        .store
        .list_where(|m| m.organization_id == organization_id)
        .await;

    tracing::info!("Listed {} metrics for organization {}", data.len(), organization_id);
    Ok(listed(data))
}

/// GET /community-metrics/active handler
#[utoipa::path(
    get,
    path = routes::METRICS_ACTIVE,
    responses(
        (status = 200, description = "Active metrics", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn active_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    Ok(listed(state.store.list_where(|m| m.is_active).await))
}

/// GET /community-metrics/inactive handler
#[utoipa::path(
    get,
    path = routes::METRICS_INACTIVE,
    responses(
        (status = 200, description = "Inactive metrics", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn inactive_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    Ok(listed(state.store.list_where(|m| !m.is_active).await))
}

/// GET /community-metrics/recent handler
///
/// Metrics created within the configured window (`RECENT_WINDOW_DAYS`),
/// newest first.
#[utoipa::path(
    get,
    path = routes::METRICS_RECENT,
    responses(
        (status = 200, description = "Recently created metrics, newest first", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn recent_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let since = Utc::now() - Duration::days(state.config.recent_window_days);
    let mut data = state.store.list_where(|m| m.created_at >= since).await;
    data.reverse();
    Ok(listed(data))
}

/// GET /community-metrics/this-month handler
#[utoipa::path(
    get,
    path = routes::METRICS_THIS_MONTH,
    responses(
        (status = 200, description = "Metrics created in the current UTC month", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn this_month_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let now = Utc::now();
    let data = state
        .store
        .list_where(|m| m.created_at.year() == now.year() && m.created_at.month() == now.month())
        .await;
    Ok(listed(data))
}

/// GET /community-metrics/this-year handler
#[utoipa::path(
    get,
    path = routes::METRICS_THIS_YEAR,
    responses(
        (status = 200, description = "Metrics created in the current UTC year", body = ListResponse)
    ),
    tag = "community-metrics"
)]
pub async fn this_year_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let year = Utc::now().year();
    let data = state.store.list_where(|m| m.created_at.year() == year).await;
    Ok(listed(data))
}

/// GET /community-metrics/statistics handler - Aggregate figures
#[utoipa::path(
    get,
    path = routes::METRICS_STATISTICS,
    responses(
        (status = 200, description = "Totals across all metrics", body = StatisticsResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    ),
    tag = "community-metrics"
)]
pub async fn statistics_handler(
    state: &AppState,
    _req: &RouteRequest,
) -> Result<(StatusCode, Json<StatisticsResponse>), ApiError> {
    Ok((StatusCode::OK, Json(state.store.statistics().await)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{body_json, send, test_app, test_state};
    use crate::models::NewMetric;
    use axum::http::Method;
    use chrono::{DateTime, TimeZone};

    fn new_metric(org: &str, name: &str, active: bool) -> NewMetric {
        NewMetric {
            organization_id: org.to_string(),
            name: name.to_string(),
            description: None,
            is_active: active,
            kwh_production: 1.0,
            co2_avoided_kg: 2.0,
            user_ids: vec![format!("{}-owner", org)],
        }
    }

    fn start_of_previous_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(Utc::now().year() - 1, 1, 1, 0, 0, 0).unwrap()
    }

    async fn names(response: axum::response::Response) -> Vec<String> {
        assert_eq!(response.status(), StatusCode::OK);
        let list: ListResponse = body_json(response).await;
        assert_eq!(list.total_count, list.data.len());
        list.data.into_iter().map(|m| m.name).collect()
    }

    #[tokio::test]
    async fn test_filters_by_organization_and_status() {
        let state = test_state();
        state.store.create(new_metric("org-a", "a1", true), Utc::now()).await.unwrap();
        state.store.create(new_metric("org-a", "a2", false), Utc::now()).await.unwrap();
        state.store.create(new_metric("org b", "b1", true), Utc::now()).await.unwrap();
        let app = test_app(state);

        let mut org_a = names(send(&app, Method::GET, "/community-metrics/by-organization/org-a", None).await).await;
        org_a.sort();
        assert_eq!(org_a, vec!["a1", "a2"]);

        let org_b = names(send(&app, Method::GET, "/community-metrics/by-organization/org%20b", None).await).await;
        assert_eq!(org_b, vec!["b1"]);

        let mut active = names(send(&app, Method::GET, "/community-metrics/active", None).await).await;
        active.sort();
        assert_eq!(active, vec!["a1", "b1"]);

        let inactive = names(send(&app, Method::GET, "/community-metrics/inactive", None).await).await;
        assert_eq!(inactive, vec!["a2"]);
    }

    #[tokio::test]
    async fn test_time_window_filters() {
        let state = test_state();
        let now = Utc::now();
        state.store.create(new_metric("o", "old", true), start_of_previous_year()).await.unwrap();
        state
            .store
            .create(new_metric("o", "last-week", true), now - Duration::days(10))
            .await
            .unwrap();
        state.store.create(new_metric("o", "fresh", true), now - Duration::hours(1)).await.unwrap();
        state.store.create(new_metric("o", "newest", true), now).await.unwrap();
        let app = test_app(state);

        let recent = names(send(&app, Method::GET, "/community-metrics/recent", None).await).await;
        assert_eq!(recent, vec!["newest", "fresh"]);

        let this_year = names(send(&app, Method::GET, "/community-metrics/this-year", None).await).await;
        assert!(!this_year.contains(&"old".to_string()));
        assert!(this_year.contains(&"newest".to_string()));

        let this_month = names(send(&app, Method::GET, "/community-metrics/this-month", None).await).await;
        assert!(!this_month.contains(&"old".to_string()));
        assert!(this_month.contains(&"newest".to_string()));
        assert!(this_month.len() <= this_year.len());
    }

    #[tokio::test]
    async fn test_statistics_endpoint() {
        let state = test_state();
        state.store.create(new_metric("org-a", "a1", true), Utc::now()).await.unwrap();
        state.store.create(new_metric("org-b", "b1", false), Utc::now()).await.unwrap();
        let app = test_app(state);

        let response = send(&app, Method::GET, "/community-metrics/statistics", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let stats: StatisticsResponse = body_json(response).await;
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.inactive_count, 1);
        assert_eq!(stats.total_kwh_production, 2.0);
        assert_eq!(stats.total_co2_avoided_kg, 4.0);
        assert_eq!(stats.distinct_users, 2);
        assert_eq!(stats.organization_count, 2);
    }

    #[tokio::test]
    async fn test_statistics_totals_saturate_instead_of_overflowing() {
        let state = test_state();
        for name in ["big-1", "big-2"] {
            let mut input = new_metric("o", name, true);
            input.kwh_production = 1.7e308;
            state.store.create(input, Utc::now()).await.unwrap();
        }
        let app = test_app(state);

        let response = send(&app, Method::GET, "/community-metrics/statistics", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let stats: StatisticsResponse = body_json(response).await;
        assert_eq!(stats.total_kwh_production, f64::MAX);
        assert_eq!(stats.total_co2_avoided_kg, 4.0);
    }
}
