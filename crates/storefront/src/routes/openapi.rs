//! Machine-readable service description served at `/openapi.json`.

use axum::Json;
use serde_json::{Value, json};

/// API title.
pub const TITLE: &str = "Google Store API";

fn session_param() -> Value {
    json!({
        "name": "session_id",
        "in": "query",
        "required": true,
        "description": "ID of the shopping session",
        "schema": {"type": "string"}
    })
}

fn cart_item_body() -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": {
            "type": "object",
            "required": ["item", "quantity"],
            "properties": {
                "item": {"type": "string"},
                "quantity": {"type": "integer"}
            }
        }}}
    })
}

fn operation(summary: &str, body: Option<Value>) -> Value {
    let mut op = json!({
        "summary": summary,
        "parameters": [session_param()],
        "responses": {"200": {"description": "Successful Response"}}
    });
    if let (Some(body), Some(map)) = (body, op.as_object_mut()) {
        map.insert("requestBody".to_string(), body);
    }
    json!({"post": op})
}

/// Build the service description.
#[must_use]
pub fn spec() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": TITLE,
            "description": "Get all the items in Google Store.",
            "version": env!("CARGO_PKG_VERSION")
        },
        // Relative to wherever this document is served from
        "servers": [{"url": "/"}],
        "paths": {
            "/get_items": operation("List items in a category", Some(json!({
                "required": true,
                "content": {"application/json": {"schema": {
                    "type": "object",
                    "required": ["item"],
                    "properties": {"item": {"type": "string"}}
                }}}
            }))),
            "/add_to_shopping_cart": operation("Add an item to the cart", Some(cart_item_body())),
            "/remove_from_shopping_cart": operation("Remove an exact cart entry", Some(cart_item_body())),
            "/view_shopping_cart": operation("View the cart with prices and total", None),
            "/place_order": operation("Place an order for the cart", None),
            "/chat/completions": {"post": {
                "summary": "Canned chat completion",
                "requestBody": {
                    "required": false,
                    "content": {"application/json": {"schema": {"type": "object"}}}
                },
                "responses": {"200": {"description": "Successful Response"}}
            }},
            "/health": {"get": {
                "summary": "Liveness check",
                "responses": {"200": {
                    "description": "Service is up",
                    "content": {"text/plain": {"schema": {"type": "string"}}}
                }}
            }}
        }
    })
}

/// Serve the service description.
pub async fn document() -> Json<Value> {
    Json(spec())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_store_endpoints() {
        let spec = spec();
        assert_eq!(spec["info"]["title"], TITLE);
        for path in [
            "/get_items",
            "/add_to_shopping_cart",
            "/remove_from_shopping_cart",
            "/view_shopping_cart",
            "/place_order",
        ] {
            assert!(spec["paths"][path]["post"].is_object(), "missing {path}");
        }
        assert!(spec["paths"]["/place_order"]["post"]["requestBody"].is_null());
        assert_eq!(
            spec["paths"]["/get_items"]["post"]["parameters"][0]["name"],
            "session_id"
        );
    }

    #[test]
    fn test_spec_lists_auxiliary_routes() {
        let spec = spec();
        assert_eq!(spec["servers"][0]["url"], "/");

        let chat = &spec["paths"]["/chat/completions"]["post"];
        assert!(chat.is_object());
        assert!(chat["parameters"].is_null(), "chat takes no session");
        assert_eq!(chat["requestBody"]["required"], false);

        assert!(spec["paths"]["/health"]["get"].is_object());
        assert!(spec["paths"]["/health"]["post"].is_null());
    }

    #[tokio::test]
    async fn test_document_served_over_http() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        use crate::routes::test_support::TestApp;

        let response = TestApp::new()
            .router
            .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let served: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(served, spec());
    }
}
