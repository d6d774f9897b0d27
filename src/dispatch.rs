use axum::{
    body::{Body, Bytes},
    extract::{Query, Request, State},
    http::Uri,
    response::{IntoResponse, Response},
    Router,
};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers;
use crate::router::{PathParams, RouterError};
use crate::routes::{self, RouteId};
use crate::state::AppState;

/// A matched request as seen by a handler
#[derive(Debug)]
pub struct RouteRequest {
    pub route_name: String,
    pub params: PathParams,
    pub uri: Uri,
    pub body: Bytes,
}

impl RouteRequest {
    pub fn param(&self, name: &str) -> Result<&str, ApiError> {
        self.params.get(name).ok_or_else(|| {
            ApiError::Routing(RouterError::MissingParameter {
                route: self.route_name.clone(),
                param: name.to_string(),
            })
        })
    }

    /// The `{communityMetric}` path parameter parsed as a UUID
    pub fn metric_id(&self) -> Result<Uuid, ApiError> {
        let raw = self.param(routes::METRIC_PARAM)?;
        Uuid::parse_str(raw).map_err(|_| ApiError::InvalidUuid(raw.to_string()))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn query<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Query::<T>::try_from_uri(&self.uri)
            .map(|Query(query)| query)
            .map_err(|rejection| ApiError::InvalidQueryParam(rejection.body_text()))
    }
}

/// Build the axum application: every request goes through the route table
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the request against the route table and invoke its handler
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    let route_match = match state.routes.match_route(&parts.method, &path) {
        Ok(route_match) => route_match,
        Err(err) => {
            let allowed = state.routes.allowed_methods(&path);
            if allowed.is_empty() {
                tracing::debug!(method = %parts.method, path = %path, "No route matched");
            } else {
                tracing::debug!(
                    method = %parts.method,
                    path = %path,
                    allowed = ?allowed,
                    "Path matched but method is not registered"
                );
            }
            return ApiError::from(err).into_response();
        }
    };

    let route_id = *route_match.handler();
    let route_name = route_match.route.name().to_string();
    let params = route_match.params;

    let body = match read_body(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(route = %route_name, "Failed to read request body: {:?}", err);
            return err.into_response();
        }
    };

    tracing::debug!(route = %route_name, params = params.len(), "Dispatching request");

    let request = RouteRequest {
        route_name,
        params,
        uri: parts.uri,
        body,
    };
    handle(route_id, &state, &request).await
}

/// Buffer the body up to `limit` bytes
async fn read_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, limit).await.map_err(|err| {
        if exceeds_limit(&err) {
            ApiError::BodyTooLarge(limit)
        } else {
            ApiError::InvalidBody(err.to_string())
        }
    })
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}

async fn handle(route: RouteId, state: &AppState, req: &RouteRequest) -> Response {
    use handlers::{counters, crud, docs, filters, health, icons};

    match route {
        RouteId::Health => health::health_handler(state, req).await.into_response(),
        RouteId::ApiDocs => docs::api_docs_handler(state, req).await.into_response(),
        RouteId::Index => crud::index_handler(state, req).await.into_response(),
        RouteId::Create => crud::create_handler(state, req).await.into_response(),
        RouteId::Store => crud::store_handler(state, req).await.into_response(),
        RouteId::Show => crud::show_handler(state, req).await.into_response(),
        RouteId::Edit => crud::edit_handler(state, req).await.into_response(),
        RouteId::Update => crud::update_handler(state, req).await.into_response(),
        RouteId::Destroy => crud::destroy_handler(state, req).await.into_response(),
        RouteId::ByOrganization => filters::by_organization_handler(state, req).await.into_response(),
        RouteId::Active => filters::active_handler(state, req).await.into_response(),
        RouteId::Inactive => filters::inactive_handler(state, req).await.into_response(),
        RouteId::Recent => filters::recent_handler(state, req).await.into_response(),
        RouteId::ThisMonth => filters::this_month_handler(state, req).await.into_response(),
        RouteId::ThisYear => filters::this_year_handler(state, req).await.into_response(),
        RouteId::Statistics => filters::statistics_handler(state, req).await.into_response(),
        RouteId::AddUser => counters::add_user_handler(state, req).await.into_response(),
        RouteId::RemoveUser => counters::remove_user_handler(state, req).await.into_response(),
        RouteId::AddKwhProduction => counters::add_kwh_production_handler(state, req).await.into_response(),
        RouteId::AddCo2Avoided => counters::add_co2_avoided_handler(state, req).await.into_response(),
        RouteId::ResetMetrics => counters::reset_metrics_handler(state, req).await.into_response(),
        RouteId::TestIcons => icons::test_icons_handler(state, req).await.into_response(),
    }
}
