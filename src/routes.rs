// Route declarations - single source of truth for all API paths and names

use axum::http::Method;

use crate::router::{RouteTable, RouteTableBuilder, RouterError};

pub const HEALTH: &str = "/health";
pub const API_DOCS: &str = "/api-docs/openapi.json";
pub const TEST_ICONS: &str = "/test-icons";

pub const METRICS_PREFIX: &str = "/community-metrics";
pub const METRICS_NAME_PREFIX: &str = "community-metrics.";

// Full paths, used by the OpenAPI annotations
pub const METRICS_LIST: &str = "/community-metrics/";
pub const METRICS_CREATE: &str = "/community-metrics/create";
pub const METRIC_ITEM: &str = "/community-metrics/{communityMetric}";
pub const METRIC_EDIT: &str = "/community-metrics/{communityMetric}/edit";
pub const METRICS_BY_ORGANIZATION: &str = "/community-metrics/by-organization/{organizationId}";
pub const METRICS_ACTIVE: &str = "/community-metrics/active";
pub const METRICS_INACTIVE: &str = "/community-metrics/inactive";
pub const METRICS_RECENT: &str = "/community-metrics/recent";
pub const METRICS_THIS_MONTH: &str = "/community-metrics/this-month";
pub const METRICS_THIS_YEAR: &str = "/community-metrics/this-year";
pub const METRICS_STATISTICS: &str = "/community-metrics/statistics";
pub const METRIC_ADD_USER: &str = "/community-metrics/{communityMetric}/add-user";
pub const METRIC_REMOVE_USER: &str = "/community-metrics/{communityMetric}/remove-user";
pub const METRIC_ADD_KWH: &str = "/community-metrics/{communityMetric}/add-kwh-production";
pub const METRIC_ADD_CO2: &str = "/community-metrics/{communityMetric}/add-co2-avoided";
pub const METRIC_RESET: &str = "/community-metrics/{communityMetric}/reset-metrics";

pub const METRIC_PARAM: &str = "communityMetric";
pub const ORGANIZATION_PARAM: &str = "organizationId";

pub const SHOW_ROUTE: &str = "community-metrics.show";

/// Typed handler reference for every declared route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Health,
    ApiDocs,
    Index,
    Create,
    Store,
    Show,
    Edit,
    Update,
    Destroy,
    ByOrganization,
    Active,
    Inactive,
    Recent,
    ThisMonth,
    ThisYear,
    Statistics,
    AddUser,
    RemoveUser,
    AddKwhProduction,
    AddCo2Avoided,
    ResetMetrics,
    TestIcons,
}

/// Build the application's route table.
pub fn route_table() -> Result<RouteTable<RouteId>, RouterError> {
    let mut builder = RouteTableBuilder::new();

    builder.register(Method::GET, HEALTH, RouteId::Health, "health")?;
    builder.register(Method::GET, API_DOCS, RouteId::ApiDocs, "api-docs")?;

    builder.group(METRICS_PREFIX, METRICS_NAME_PREFIX, |metrics| {
        metrics.get("/", RouteId::Index, "index")?;
        metrics.get("/create", RouteId::Create, "create")?;
        metrics.post("/", RouteId::Store, "store")?;
        metrics.get("/{communityMetric}", RouteId::Show, "show")?;
        metrics.get("/{communityMetric}/edit", RouteId::Edit, "edit")?;
        metrics.put("/{communityMetric}", RouteId::Update, "update")?;
        metrics.delete("/{communityMetric}", RouteId::Destroy, "destroy")?;

        metrics.get(
            "/by-organization/{organizationId}",
            RouteId::ByOrganization,
            "by-organization",
        )?;
        metrics.get("/active", RouteId::Active, "active")?;
        metrics.get("/inactive", RouteId::Inactive, "inactive")?;
        metrics.get("/recent", RouteId::Recent, "recent")?;
        metrics.get("/this-month", RouteId::ThisMonth, "this-month")?;
        metrics.get("/this-year", RouteId::ThisYear, "this-year")?;
        metrics.get("/statistics", RouteId::Statistics, "statistics")?;

        metrics.post("/{communityMetric}/add-user", RouteId::AddUser, "add-user")?;
        metrics.post("/{communityMetric}/remove-user", RouteId::RemoveUser, "remove-user")?;
        metrics.post(
            "/{communityMetric}/add-kwh-production",
            RouteId::AddKwhProduction,
            "add-kwh-production",
        )?;
        metrics.post(
            "/{communityMetric}/add-co2-avoided",
            RouteId::AddCo2Avoided,
            "add-co2-avoided",
        )?;
        metrics.post(
            "/{communityMetric}/reset-metrics",
            RouteId::ResetMetrics,
            "reset-metrics",
        )?;
        Ok(())
    })?;

    builder.register(Method::GET, TEST_ICONS, RouteId::TestIcons, "test.icons")?;

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<RouteId> {
        route_table().expect("route table should build")
    }

    #[test]
    fn test_every_literal_route_matches_without_params() {
        let table = table();
        let literal_routes = [
            (Method::GET, "/community-metrics/", RouteId::Index),
            (Method::GET, "/community-metrics/create", RouteId::Create),
            (Method::POST, "/community-metrics/", RouteId::Store),
            (Method::GET, "/community-metrics/active", RouteId::Active),
            (Method::GET, "/community-metrics/inactive", RouteId::Inactive),
            (Method::GET, "/community-metrics/recent", RouteId::Recent),
            (Method::GET, "/community-metrics/this-month", RouteId::ThisMonth),
            (Method::GET, "/community-metrics/this-year", RouteId::ThisYear),
            (Method::GET, "/community-metrics/statistics", RouteId::Statistics),
            (Method::GET, "/test-icons", RouteId::TestIcons),
            (Method::GET, "/health", RouteId::Health),
            (Method::GET, "/api-docs/openapi.json", RouteId::ApiDocs),
        ];

        for (method, path, expected) in literal_routes {
            let m = table.match_route(&method, path).unwrap();
            assert_eq!(*m.handler(), expected, "{} {}", method, path);
            assert!(m.params.is_empty(), "{} {} bound params", method, path);
        }
    }

    #[test]
    fn test_route_names_match_declared_paths() {
        let table = table();
        let expected = [
            ("community-metrics.index", "/community-metrics/"),
            ("community-metrics.create", "/community-metrics/create"),
            ("community-metrics.store", "/community-metrics/"),
            ("community-metrics.show", METRIC_ITEM),
            ("community-metrics.edit", METRIC_EDIT),
            ("community-metrics.update", METRIC_ITEM),
            ("community-metrics.destroy", METRIC_ITEM),
            ("community-metrics.by-organization", METRICS_BY_ORGANIZATION),
            ("community-metrics.active", METRICS_ACTIVE),
            ("community-metrics.inactive", METRICS_INACTIVE),
            ("community-metrics.recent", METRICS_RECENT),
            ("community-metrics.this-month", METRICS_THIS_MONTH),
            ("community-metrics.this-year", METRICS_THIS_YEAR),
            ("community-metrics.statistics", METRICS_STATISTICS),
            ("community-metrics.add-user", METRIC_ADD_USER),
            ("community-metrics.remove-user", METRIC_REMOVE_USER),
            ("community-metrics.add-kwh-production", METRIC_ADD_KWH),
            ("community-metrics.add-co2-avoided", METRIC_ADD_CO2),
            ("community-metrics.reset-metrics", METRIC_RESET),
            ("test.icons", TEST_ICONS),
        ];

        for (name, path) in expected {
            let route = table.route(name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(route.pattern().as_str(), path);
        }
        assert_eq!(table.len(), expected.len() + 2);
    }

    #[test]
    fn test_numeric_id_resolves_to_show() {
        let table = table();
        let m = table.match_route(&Method::GET, "/community-metrics/42").unwrap();
        assert_eq!(*m.handler(), RouteId::Show);
        assert_eq!(m.params.get(METRIC_PARAM), Some("42"));
    }

    #[test]
    fn test_literal_wins_over_metric_param() {
        let table = table();
        for (path, expected) in [
            ("/community-metrics/active", RouteId::Active),
            ("/community-metrics/inactive", RouteId::Inactive),
            ("/community-metrics/recent", RouteId::Recent),
            ("/community-metrics/this-month", RouteId::ThisMonth),
            ("/community-metrics/this-year", RouteId::ThisYear),
            ("/community-metrics/statistics", RouteId::Statistics),
            ("/community-metrics/create", RouteId::Create),
        ] {
            let m = table.match_route(&Method::GET, path).unwrap();
            assert_eq!(*m.handler(), expected);
        }
    }

    #[test]
    fn test_percent_encoded_literal_still_wins() {
        let table = table();
        let m = table.match_route(&Method::GET, "/community-metrics/%61ctive").unwrap();
        assert_eq!(*m.handler(), RouteId::Active);
        assert!(m.params.is_empty());

        let m = table
            .match_route(&Method::POST, "/community-metrics/7/add%2Duser")
            .unwrap();
        assert_eq!(*m.handler(), RouteId::AddUser);
    }

    #[test]
    fn test_parameterised_mutations() {
        let table = table();
        let cases = [
            (Method::PUT, "/community-metrics/7", RouteId::Update),
            (Method::DELETE, "/community-metrics/7", RouteId::Destroy),
            (Method::GET, "/community-metrics/7/edit", RouteId::Edit),
            (Method::POST, "/community-metrics/7/add-user", RouteId::AddUser),
            (Method::POST, "/community-metrics/7/remove-user", RouteId::RemoveUser),
            (Method::POST, "/community-metrics/7/add-kwh-production", RouteId::AddKwhProduction),
            (Method::POST, "/community-metrics/7/add-co2-avoided", RouteId::AddCo2Avoided),
            (Method::POST, "/community-metrics/7/reset-metrics", RouteId::ResetMetrics),
        ];
        for (method, path, expected) in cases {
            let m = table.match_route(&method, path).unwrap();
            assert_eq!(*m.handler(), expected);
            assert_eq!(m.params.get(METRIC_PARAM), Some("7"));
        }

        let m = table
            .match_route(&Method::GET, "/community-metrics/by-organization/org-9")
            .unwrap();
        assert_eq!(*m.handler(), RouteId::ByOrganization);
        assert_eq!(m.params.get(ORGANIZATION_PARAM), Some("org-9"));
    }

    #[test]
    fn test_unknown_suffix_is_not_found() {
        let table = table();
        let result = table.match_route(&Method::GET, "/community-metrics/nonexistent/unknown-suffix");
        assert!(matches!(result, Err(RouterError::NotFound { .. })));
    }

    #[test]
    fn test_url_for_show() {
        let table = table();
        assert_eq!(
            table.url_for(SHOW_ROUTE, &[(METRIC_PARAM, "42")]).unwrap(),
            "/community-metrics/42"
        );

        let err = table.url_for(SHOW_ROUTE, &[]).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, RouterError::MissingParameter { .. }));
    }
}
