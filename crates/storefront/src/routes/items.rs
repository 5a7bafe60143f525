//! Catalog route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use pixel_store_core::Item;
use serde::Deserialize;
use tracing::instrument;

use super::{ResultsResponse, SessionQuery};
use crate::error::Result;
use crate::state::AppState;

/// Get items request body.
#[derive(Debug, Deserialize)]
pub struct GetItemsRequest {
    /// Category label (e.g., "phone"), matched ignoring case.
    pub item: String,
}

/// List every item in a category.
///
/// An unknown category yields an empty result list. The session is required
/// but does not affect the result.
#[instrument(skip(state))]
pub async fn get_items(
    State(state): State<AppState>,
    Query(_session): Query<SessionQuery>,
    Json(payload): Json<GetItemsRequest>,
) -> Result<Json<ResultsResponse<Item>>> {
    let items = state.inventory().list_items(&payload.item)?;
    if items.is_empty() {
        let known = state.inventory().categories()?;
        tracing::debug!(category = %payload.item, ?known, "No items for category");
    }
    Ok(Json(items.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{TestApp, post_json};

    #[tokio::test]
    async fn test_get_items_returns_full_records() {
        let app = TestApp::new();
        let (status, body) =
            post_json(&app.router, "/get_items?session_id=s1", &json!({"item": "watch"})).await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["name"], "Pixel Watch 2");
        assert_eq!(results[0]["price"], "349.00");
        assert_eq!(results[0]["quantity"], 8);
        assert!(results[0]["features"].is_array());
    }

    #[tokio::test]
    async fn test_get_items_ignores_case() {
        let app = TestApp::new();
        let (_, body) =
            post_json(&app.router, "/get_items?session_id=s1", &json!({"item": "Phone"})).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_items_unknown_category_is_empty() {
        let app = TestApp::new();
        let (status, body) =
            post_json(&app.router, "/get_items?session_id=s1", &json!({"item": "tablet"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"results": []}));
    }

    #[tokio::test]
    async fn test_get_items_requires_session_id() {
        let app = TestApp::new();
        let (status, _) = post_json(&app.router, "/get_items", &json!({"item": "phone"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
