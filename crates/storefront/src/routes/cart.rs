//! Shopping cart route handlers.
//!
//! Carts live in memory and are keyed by the `session_id` query parameter.
//! Nothing is reserved when an item is added; stock only changes when an
//! order is placed.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use super::{MessageResponse, ResultsResponse, SessionQuery};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Add/remove cart request body.
#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    /// Item name, matched ignoring case.
    pub item: String,
    /// Number of units. Signed so that non-positive values reach validation.
    pub quantity: i64,
}

/// Add an item to the session's cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    Json(payload): Json<CartItemRequest>,
) -> Result<Json<MessageResponse>> {
    let entry = state.carts().add(
        state.inventory(),
        &query.session(),
        &payload.item,
        payload.quantity,
    )?;

    let quantity = entry.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("item", entry.item.as_str()), ("quantity", quantity.as_str())],
    );

    Ok(Json(MessageResponse {
        message: format!(
            "Added {} x {} to the shopping cart.",
            entry.quantity, entry.item
        ),
    }))
}

/// Remove an exact `(item, quantity)` entry from the session's cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    Json(payload): Json<CartItemRequest>,
) -> Result<Json<MessageResponse>> {
    let entry = state
        .carts()
        .remove(&query.session(), &payload.item, payload.quantity)?;

    Ok(Json(MessageResponse {
        message: format!(
            "Removed {} x {} from the shopping cart.",
            entry.quantity, entry.item
        ),
    }))
}

/// Show the session's cart: one priced line per entry, then the total.
#[instrument(skip(state))]
pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ResultsResponse<String>>> {
    let summary = state.carts().view(state.inventory(), &query.session())?;
    Ok(Json(summary.to_lines().into()))
}
