//! Order route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use super::{ResultsResponse, SessionQuery};
use crate::error::{Result, add_breadcrumb};
use crate::services::{self, OrderReceipt};
use crate::state::AppState;

/// Place an order for the session's cart.
///
/// Returns one message per cart entry. The cart is emptied even when some
/// lines fail. An empty cart returns an informational message, not an error.
#[instrument(skip(state))]
pub async fn place_order(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ResultsResponse<String>>> {
    let session = query.session();
    let receipt = services::place_order(state.inventory(), state.carts(), &session)?;

    if let OrderReceipt::Placed(lines) = &receipt {
        let count = lines.len().to_string();
        add_breadcrumb(
            "order",
            "Order placed",
            &[("session_id", session.as_str()), ("lines", count.as_str())],
        );
    }

    Ok(Json(receipt.messages().into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::StatusCode;
    use pixel_store_core::SessionId;
    use serde_json::json;

    use crate::routes::test_support::{TestApp, post_empty, post_json};
    use crate::services::orders::EMPTY_CART_MESSAGE;

    fn stock(app: &TestApp, name: &str) -> u32 {
        app.state.inventory().find_item(name).unwrap().unwrap().quantity
    }

    #[tokio::test]
    async fn test_place_order_empty_cart_is_informational() {
        let app = TestApp::new();
        let (status, body) = post_empty(&app.router, "/place_order?session_id=empty").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], json!([EMPTY_CART_MESSAGE]));
        assert_eq!(stock(&app, "Pixel 8"), 10);
    }

    #[tokio::test]
    async fn test_add_then_order_decrements_stock() {
        let app = TestApp::new();
        post_json(
            &app.router,
            "/add_to_shopping_cart?session_id=s1",
            &json!({"item": "Pixel 8", "quantity": 5}),
        )
        .await;

        let (status, body) = post_empty(&app.router, "/place_order?session_id=s1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], json!(["Order placed for 5 x Pixel 8."]));
        assert_eq!(stock(&app, "Pixel 8"), 5);
        assert!(
            app.state
                .carts()
                .entries(&SessionId::new("s1"))
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_oversold_line_fails_and_cart_still_clears() {
        let app = TestApp::new();
        for session in ["a", "b"] {
            post_json(
                &app.router,
                &format!("/add_to_shopping_cart?session_id={session}"),
                &json!({"item": "Pixel Watch 1", "quantity": 3}),
            )
            .await;
        }

        post_empty(&app.router, "/place_order?session_id=a").await;
        let (status, body) = post_empty(&app.router, "/place_order?session_id=b").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["results"][0],
            "Could not order 3 x Pixel Watch 1: insufficient stock (only 1 left)."
        );
        assert_eq!(stock(&app, "Pixel Watch 1"), 1);

        let (_, view) = post_empty(&app.router, "/view_shopping_cart?session_id=b").await;
        assert_eq!(view["results"], json!([]));
    }
}
