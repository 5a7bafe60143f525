//! Helpers for router tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// A router over fresh state seeded with the built-in catalog.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let state = AppState::new(&StorefrontConfig::default()).unwrap();
        Self {
            router: crate::app(state.clone()),
            state,
        }
    }
}

/// POST `body` as JSON to `uri`, returning the status and parsed JSON body
/// (`Value::Null` if the body is not JSON).
#[allow(clippy::unwrap_used)]
pub async fn post_json(router: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(router, request).await
}

/// POST with no body to `uri`.
#[allow(clippy::unwrap_used)]
pub async fn post_empty(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::post(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

#[allow(clippy::unwrap_used)]
async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
