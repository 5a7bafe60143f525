//! Per-request correlation: request ID and shopping session.
//!
//! Every request gets an `x-request-id` (reused from upstream when usable,
//! otherwise a fresh UUID v4) that is echoed on the response. Store endpoints
//! are scoped by the `session_id` query parameter; when present it is attached
//! next to the request ID, so a cart's whole history can be followed across
//! requests in logs and Sentry.

use axum::extract::{Query, Request};
use axum::http::{HeaderMap, HeaderValue, Uri};
use axum::middleware::Next;
use axum::response::Response;
use pixel_store_core::SessionId;
use serde::Deserialize;
use tracing::Span;
use uuid::Uuid;

/// Request ID header, read from the request and set on the response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID that is passed through unchanged.
pub const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Deserialize)]
struct SessionParam {
    session_id: Option<String>,
}

/// The upstream request ID if it is non-blank and at most
/// [`MAX_REQUEST_ID_LEN`] bytes, else a new UUID v4.
#[must_use]
pub fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// The `session_id` query parameter, if the URI has one.
///
/// Unparseable query strings yield `None`; the handler's own extractor reports
/// those to the client.
#[must_use]
pub fn session_from(uri: &Uri) -> Option<SessionId> {
    Query::<SessionParam>::try_from_uri(uri)
        .ok()
        .and_then(|Query(param)| param.session_id)
        .map(SessionId::from)
}

/// Attach the request ID and session to the current span and Sentry scope,
/// then echo the request ID on the response.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_from(request.headers());
    let session = session_from(request.uri());

    let span = Span::current();
    span.record("request_id", request_id.as_str());
    if let Some(session) = &session {
        span.record("session_id", session.as_str());
    }

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
        match &session {
            Some(session) => scope.set_tag("session_id", session),
            None => scope.remove_tag("session_id"),
        }
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
