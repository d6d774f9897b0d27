use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::{
    AmountRequest, CommunityMetric, ListResponse, MetricForm, MetricUpdate, NewMetric,
    StatisticsResponse, UserRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "community-metrics-api",
        version = "0.1.0",
        description = "Community energy production and avoided-emissions metrics"
    ),
    paths(
        handlers::health::health_handler,
        handlers::crud::index_handler,
        handlers::crud::create_handler,
        handlers::crud::store_handler,
        handlers::crud::show_handler,
        handlers::crud::edit_handler,
        handlers::crud::update_handler,
        handlers::crud::destroy_handler,
        handlers::filters::by_organization_handler,
        handlers::filters::active_handler,
        handlers::filters::inactive_handler,
        handlers::filters::recent_handler,
        handlers::filters::this_month_handler,
        handlers::filters::this_year_handler,
        handlers::filters::statistics_handler,
        handlers::counters::add_user_handler,
        handlers::counters::remove_user_handler,
        handlers::counters::add_kwh_production_handler,
        handlers::counters::add_co2_avoided_handler,
        handlers::counters::reset_metrics_handler,
        handlers::icons::test_icons_handler
    ),
    components(
        schemas(
            CommunityMetric,
            NewMetric,
            MetricUpdate,
            MetricForm,
            UserRequest,
            AmountRequest,
            ListResponse,
            StatisticsResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "community-metrics", description = "Community metric operations"),
        (name = "test", description = "Diagnostic pages")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_has_one_path_per_pattern() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        // index/store share a pattern, as do show/update/destroy
        assert_eq!(paths.len(), 18);
        let item = &paths["/community-metrics/{communityMetric}"];
        assert!(item.get("get").is_some());
        assert!(item.get("put").is_some());
        assert!(item.get("delete").is_some());
    }
}
