use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::router::RouterError;
use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub routes: usize,
}

/// Custom error type for API endpoints
///
/// This error type provides consistent error handling across all endpoints,
/// automatically mapping different error types to appropriate HTTP status codes
/// and formatting them as JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// No registered route for the method and path
    RouteNotFound(RouterError),
    /// Invalid UUID format in path parameter
    InvalidUuid(String),
    /// Metric not found in the store
    MetricNotFound(Uuid),
    /// User not attached to the metric
    UserNotFound { metric_id: Uuid, user_id: String },
    /// Request content failed validation
    InvalidInput(String),
    /// JSON parsing error
    JsonError(serde_json::Error),
    /// Invalid query parameter
    InvalidQueryParam(String),
    /// Request body exceeded the configured limit
    BodyTooLarge(usize),
    /// Request body could not be read, e.g. the client aborted mid-stream
    InvalidBody(String),
    /// Route table misuse, e.g. building a URL without its parameters
    Routing(RouterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::RouteNotFound(err) => (
                StatusCode::NOT_FOUND,
                format!("Route not found: {}", err),
            ),
            ApiError::InvalidUuid(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid UUID format: expected format like '550e8400-e29b-41d4-a716-446655440000', got '{}'", id),
            ),
            ApiError::MetricNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Metric not found: {}", id),
            ),
            ApiError::UserNotFound { metric_id, user_id } => (
                StatusCode::NOT_FOUND,
                format!("User '{}' is not attached to metric {}", user_id, metric_id),
            ),
            ApiError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input: {}", msg),
            ),
            ApiError::JsonError(err) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", err),
            ),
            ApiError::InvalidQueryParam(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid query parameter: {}", msg),
            ),
            ApiError::BodyTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body exceeds {} bytes", limit),
            ),
            ApiError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Failed to read request body: {}", msg),
            ),
            ApiError::Routing(err) => {
                tracing::error!("Route table error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Routing error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        if err.is_configuration() {
            ApiError::Routing(err)
        } else {
            ApiError::RouteNotFound(err)
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MetricNotFound(id) => ApiError::MetricNotFound(id),
            StoreError::UserNotFound { metric_id, user_id } => {
                ApiError::UserNotFound { metric_id, user_id }
            }
            StoreError::InvalidInput(msg) => ApiError::InvalidInput(msg),
        }
    }
}
