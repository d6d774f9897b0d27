use crate::dispatch::RouteRequest;
use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;
use axum::response::Html;

/// Icons used by the community metrics pages
pub const ICONS: &[&str] = &[
    "solar-panel",
    "wind-turbine",
    "battery",
    "bolt",
    "leaf",
    "users",
    "chart-line",
    "calendar",
];

/// GET /test-icons handler - Static page rendering every icon name
#[utoipa::path(
    get,
    path = routes::TEST_ICONS,
    responses(
        (status = 200, description = "HTML icon gallery", body = String, content_type = "text/html")
    ),
    tag = "test"
)]
pub async fn test_icons_handler(_state: &AppState, _req: &RouteRequest) -> Result<Html<String>, ApiError> {
    let items: String = ICONS
        .iter()
        .map(|icon| format!("    <li><i class=\"icon icon-{0}\"></i> {0}</li>\n", icon))
        .collect();

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Icon test</title></head>\n<body>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        items
    )))
}
