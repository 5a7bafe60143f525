//! HTTP route handlers for storefront.
//!
//! Every store endpoint is a JSON `POST` scoped to a cart by the `session_id`
//! query parameter.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//! GET  /openapi.json                  - Service description
//!
//! # Catalog
//! POST /get_items                     - Items in a category     body {item}
//!
//! # Cart
//! POST /add_to_shopping_cart          - Append a cart entry     body {item, quantity}
//! POST /remove_from_shopping_cart     - Remove an exact entry   body {item, quantity}
//! POST /view_shopping_cart            - Priced cart lines and total
//!
//! # Orders
//! POST /place_order                   - Fulfill the cart against inventory
//!
//! # Chat
//! POST /chat/completions              - Canned chat-completion stub
//! ```

pub mod cart;
pub mod chat;
pub mod items;
pub mod openapi;
pub mod orders;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    Router,
    routing::{get, post},
};
use pixel_store_core::SessionId;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// `?session_id=` query parameter.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

impl SessionQuery {
    /// The session this request is scoped to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        SessionId::new(self.session_id.as_str())
    }
}

/// `{"results": [...]}` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for ResultsResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self { results }
    }
}

/// `{"message": "..."}` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the shopping cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add_to_shopping_cart", post(cart::add))
        .route("/remove_from_shopping_cart", post(cart::remove))
        .route("/view_shopping_cart", post(cart::view))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi::document))
        // Catalog
        .route("/get_items", post(items::get_items))
        // Cart
        .merge(cart_routes())
        // Orders
        .route("/place_order", post(orders::place_order))
        // Chat stub
        .route("/chat/completions", post(chat::completions))
}
