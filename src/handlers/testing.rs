use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::config::Config;
use crate::dispatch;
use crate::state::AppState;

pub(crate) fn test_state() -> AppState {
    AppState::new(Config::default()).expect("route table should build")
}

pub(crate) fn test_app(state: AppState) -> Router {
    dispatch::app(state)
}

pub(crate) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub(crate) async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
