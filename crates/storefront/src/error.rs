//! Handler error type and its HTTP mapping.
//!
//! Every handler returns [`Result`]. Domain errors convert into [`AppError`]
//! with `?` and are rendered as `{"detail": "<message>"}`:
//!
//! | error | status |
//! |---|---|
//! | bad quantity, insufficient stock | 400 |
//! | unknown item, no matching cart entry | 404 |
//! | poisoned lock | 500, reported to Sentry, detail hidden |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::services::{CartError, OrderError};

/// Any failure a store handler can report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

const HIDDEN_DETAIL: &str = "Internal server error";

const fn inventory_status(err: &InventoryError) -> StatusCode {
    match err {
        InventoryError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        InventoryError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        InventoryError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Inventory(err) | Self::Cart(CartError::Inventory(err)) => inventory_status(err),
            Self::Cart(CartError::InvalidQuantity(_)) => StatusCode::BAD_REQUEST,
            Self::Cart(CartError::EntryNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::LockPoisoned) | Self::Order(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
            HIDDEN_DETAIL.to_string()
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Handler result.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a store action as a Sentry breadcrumb.
///
/// Breadcrumbs are attached to any event later captured in the same scope,
/// e.g. the cart additions that preceded a failed order.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        level: sentry::Level::Info,
        data: data
            .iter()
            .map(|(k, v)| ((*k).to_owned(), serde_json::Value::from(*v)))
            .collect(),
        ..Default::default()
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    async fn detail(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json["detail"].as_str().unwrap().to_owned())
    }

    #[test]
    fn test_status_mapping() {
        let cases: [(AppError, StatusCode); 6] = [
            (CartError::InvalidQuantity(-3).into(), StatusCode::BAD_REQUEST),
            (
                CartError::Inventory(InventoryError::ItemNotFound("x".to_owned())).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                CartError::Inventory(InventoryError::InsufficientStock {
                    item: "Pixel Fold".to_owned(),
                    requested: 9,
                    available: 5,
                })
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                CartError::EntryNotFound {
                    item: "Pixel 8".to_owned(),
                    quantity: 2,
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::Cart(CartError::LockPoisoned).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                InventoryError::LockPoisoned.into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn test_display_is_transparent() {
        let err = AppError::from(CartError::InvalidQuantity(0));
        assert_eq!(err.to_string(), "Quantity must be a positive integer (got 0)");
    }

    #[tokio::test]
    async fn test_server_error_detail_is_hidden() {
        let (status, detail) = detail(CartError::LockPoisoned.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, HIDDEN_DETAIL);
    }

    #[tokio::test]
    async fn test_client_error_detail_is_shown() {
        let (status, detail) =
            detail(InventoryError::ItemNotFound("Pixel 9".to_owned()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "Item 'Pixel 9' not found");
    }

    #[test]
    fn test_breadcrumb_attached_to_later_event() {
        let events = sentry::test::with_captured_events(|| {
            add_breadcrumb(
                "cart",
                "Added to cart",
                &[("item", "Pixel 8"), ("quantity", "2")],
            );
            sentry::capture_message("order failed", sentry::Level::Error);
        });

        assert_eq!(events.len(), 1);
        let crumb = events[0]
            .breadcrumbs
            .values
            .iter()
            .find(|b| b.category.as_deref() == Some("cart"))
            .unwrap();
        assert_eq!(crumb.message.as_deref(), Some("Added to cart"));
        assert_eq!(crumb.data["item"], "Pixel 8");
        assert_eq!(crumb.data["quantity"], "2");
    }

    #[test]
    fn test_only_server_errors_reach_sentry() {
        let events = sentry::test::with_captured_events(|| {
            let _ = AppError::from(CartError::InvalidQuantity(0)).into_response();
            let _ = AppError::from(CartError::LockPoisoned).into_response();
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, sentry::Level::Error);
    }
}
