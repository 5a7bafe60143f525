//! Order placement.
//!
//! Placing an order empties the session's cart and tries to take each entry
//! out of stock independently. A line that fails (unknown item, not enough
//! stock) stays failed; lines that succeeded are not rolled back.
//!
//! Once the cart has been taken, every entry ends up in the receipt. If the
//! inventory becomes unusable partway through, the lines already fulfilled keep
//! their status and the current and remaining lines are reported as failed.

use pixel_store_core::{OrderLine, OrderLineStatus, SessionId};
use thiserror::Error;
use tracing::instrument;

use crate::inventory::{Inventory, InventoryError};
use crate::services::cart::{CartError, CartStore};

/// Message returned when there is nothing to order.
pub const EMPTY_CART_MESSAGE: &str = "Your shopping cart is empty. Nothing to order.";

/// Reason recorded on lines that could not be attempted.
pub const INVENTORY_UNAVAILABLE: &str = "inventory unavailable";

/// Errors that abort order placement before any stock is touched.
///
/// Per-line failures are not errors; they are recorded on the [`OrderLine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Result of placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderReceipt {
    /// The cart had no entries; inventory was not touched.
    EmptyCart,
    /// One terminal line per former cart entry, in cart order.
    Placed(Vec<OrderLine>),
}

impl OrderReceipt {
    /// Human-readable outcome messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::EmptyCart => vec![EMPTY_CART_MESSAGE.to_string()],
            Self::Placed(lines) => lines.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Place an order for everything in the session's cart.
///
/// # Errors
///
/// Returns an error only if the cart lock is poisoned, in which case neither
/// the cart nor the inventory has changed. Stock problems, including a
/// poisoned inventory lock, are reported per line in the receipt.
#[instrument(skip(inventory, carts))]
pub fn place_order(
    inventory: &Inventory,
    carts: &CartStore,
    session: &SessionId,
) -> Result<OrderReceipt, OrderError> {
    let entries = carts.take(session)?;
    if entries.is_empty() {
        tracing::info!("Order requested for empty cart");
        return Ok(OrderReceipt::EmptyCart);
    }

    let mut lines = Vec::with_capacity(entries.len());
    let mut inventory_ok = true;
    for entry in entries {
        let line = OrderLine::pending(entry);
        if !inventory_ok {
            lines.push(line.fail(INVENTORY_UNAVAILABLE));
            continue;
        }
        let line = match inventory.decrement_stock(&line.entry.item, line.entry.quantity) {
            Ok(_) => line.fulfill(),
            Err(InventoryError::ItemNotFound(_)) => line.fail("item not found"),
            Err(InventoryError::InsufficientStock { available, .. }) => {
                line.fail(format!("insufficient stock (only {available} left)"))
            }
            Err(InventoryError::LockPoisoned) => {
                tracing::error!(item = %line.entry.item, "Inventory lock poisoned during order");
                inventory_ok = false;
                line.fail(INVENTORY_UNAVAILABLE)
            }
        };
        lines.push(line);
    }

    let fulfilled = lines
        .iter()
        .filter(|l| l.status == OrderLineStatus::Fulfilled)
        .count();
    tracing::info!(lines = lines.len(), fulfilled, "Order placed");

    Ok(OrderReceipt::Placed(lines))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pixel_store_core::CartEntry;

    use super::*;
    use crate::inventory::Catalog;

    fn setup() -> (Inventory, CartStore, SessionId) {
        (
            Inventory::new(Catalog::builtin().unwrap()).unwrap(),
            CartStore::new(),
            SessionId::new("session-1"),
        )
    }

    fn stock(inv: &Inventory, name: &str) -> u32 {
        inv.find_item(name).unwrap().unwrap().quantity
    }

    #[test]
    fn test_empty_cart_leaves_inventory_unchanged() {
        let (inv, carts, session) = setup();
        let before = inv.list_items("phone").unwrap();

        let receipt = place_order(&inv, &carts, &session).unwrap();
        assert_eq!(receipt, OrderReceipt::EmptyCart);
        assert_eq!(receipt.messages(), [EMPTY_CART_MESSAGE]);
        assert_eq!(inv.list_items("phone").unwrap(), before);
    }

    #[test]
    fn test_order_decrements_stock_and_clears_cart() {
        let (inv, carts, session) = setup();
        carts.add(&inv, &session, "Pixel 8", 5).unwrap();
        assert_eq!(carts.entries(&session).unwrap(), [CartEntry::new("Pixel 8", 5)]);

        let receipt = place_order(&inv, &carts, &session).unwrap();
        assert_eq!(receipt.messages(), ["Order placed for 5 x Pixel 8."]);
        assert_eq!(stock(&inv, "Pixel 8"), 5);
        assert!(carts.entries(&session).unwrap().is_empty());
    }

    #[test]
    fn test_partial_failure_keeps_fulfilled_lines() {
        let (inv, carts, session) = setup();
        let other = SessionId::new("session-2");

        // Both sessions pass the add-time stock check for the same 5 units.
        carts.add(&inv, &session, "Pixel Fold", 4).unwrap();
        carts.add(&inv, &session, "Pixel 7a", 1).unwrap();
        carts.add(&inv, &other, "Pixel Fold", 3).unwrap();

        place_order(&inv, &carts, &other).unwrap();
        assert_eq!(stock(&inv, "Pixel Fold"), 2);

        let OrderReceipt::Placed(lines) = place_order(&inv, &carts, &session).unwrap() else {
            panic!("expected placed order");
        };
        assert_eq!(
            lines[0].status,
            OrderLineStatus::Failed {
                reason: "insufficient stock (only 2 left)".to_string()
            }
        );
        assert_eq!(lines[1].status, OrderLineStatus::Fulfilled);
        assert_eq!(stock(&inv, "Pixel Fold"), 2);
        assert_eq!(stock(&inv, "Pixel 7a"), 14);
        assert!(carts.entries(&session).unwrap().is_empty());
    }

    #[test]
    fn test_unusable_inventory_reports_every_line() {
        let (inv, carts, session) = setup();
        carts.add(&inv, &session, "Pixel 8", 1).unwrap();
        carts.add(&inv, &session, "Pixel Buds Pro", 2).unwrap();
        inv.poison();

        let receipt = place_order(&inv, &carts, &session).unwrap();
        assert_eq!(
            receipt.messages(),
            [
                "Could not order 1 x Pixel 8: inventory unavailable.",
                "Could not order 2 x Pixel Buds Pro: inventory unavailable.",
            ]
        );
        assert!(carts.entries(&session).unwrap().is_empty());
    }

    #[test]
    fn test_second_order_on_cleared_cart_is_empty() {
        let (inv, carts, session) = setup();
        carts.add(&inv, &session, "Pixel Watch 2", 1).unwrap();
        place_order(&inv, &carts, &session).unwrap();

        assert_eq!(
            place_order(&inv, &carts, &session).unwrap(),
            OrderReceipt::EmptyCart
        );
        assert_eq!(stock(&inv, "Pixel Watch 2"), 7);
    }
}
