//! Per-session shopping carts.
//!
//! A cart is an ordered list of `(item, quantity)` entries keyed by the
//! caller-supplied session ID. Carts are created on first add, emptied when an
//! order is placed, and never deleted.
//!
//! Adding checks the requested quantity against the item's current stock but
//! does not reserve it. Stock only changes when an order is placed, so carts in
//! different sessions can together ask for more than is available.

use core::fmt;
use std::collections::HashMap;
use std::sync::RwLock;

use pixel_store_core::{CartEntry, Price, SessionId};
use thiserror::Error;
use tracing::instrument;

use crate::inventory::{Inventory, InventoryError};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Quantity must be a positive integer (got {0})")]
    InvalidQuantity(i64),
    #[error("No cart entry with {quantity} x {item}")]
    EntryNotFound { item: String, quantity: i64 },
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("cart lock poisoned")]
    LockPoisoned,
}

/// One priced line of a cart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub entry: CartEntry,
    /// Unit price, or `None` if the item is no longer in the catalog.
    pub unit_price: Option<Price>,
}

impl CartLine {
    /// Unit price times quantity, if the price is known.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.unit_price.map(|p| p.times(self.entry.quantity))
    }
}

impl fmt::Display for CartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CartEntry { item, quantity } = &self.entry;
        match (self.unit_price, self.subtotal()) {
            (Some(unit), Some(subtotal)) => {
                write!(f, "{item} x {quantity} @ {unit} = {subtotal}")
            }
            _ => write!(f, "{item} x {quantity}: price unavailable"),
        }
    }
}

/// A priced snapshot of a session's cart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
}

impl CartSummary {
    /// Sum of all known subtotals. Lines without a price are skipped.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().filter_map(CartLine::subtotal).sum()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Human-readable lines with the total last. Empty for an empty cart.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<String> = self.lines.iter().map(ToString::to_string).collect();
        out.push(format!("Total: {}", self.total()));
        out
    }
}

/// All carts, keyed by session.
#[derive(Default)]
pub struct CartStore {
    carts: RwLock<HashMap<SessionId, Vec<CartEntry>>>,
}

impl CartStore {
    /// Create an empty cart store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `item` to the session's cart.
    ///
    /// The stored entry uses the item's catalog spelling.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if `quantity` is not positive
    /// - [`InventoryError::ItemNotFound`] if no item has this name
    /// - [`InventoryError::InsufficientStock`] if `quantity` exceeds current stock,
    ///   including quantities too large to store
    #[instrument(skip(self, inventory))]
    pub fn add(
        &self,
        inventory: &Inventory,
        session: &SessionId,
        item: &str,
        quantity: i64,
    ) -> Result<CartEntry, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let found = inventory
            .find_item(item)?
            .ok_or_else(|| InventoryError::ItemNotFound(item.to_string()))?;

        // Anything past u32::MAX is necessarily more than any item's stock.
        let Some(requested) = u32::try_from(quantity)
            .ok()
            .filter(|&q| q <= found.quantity)
        else {
            return Err(InventoryError::InsufficientStock {
                item: found.name,
                requested: quantity.unsigned_abs(),
                available: found.quantity,
            }
            .into());
        };

        let entry = CartEntry::new(found.name, requested);
        self.carts
            .write()
            .map_err(|_| CartError::LockPoisoned)?
            .entry(session.clone())
            .or_default()
            .push(entry.clone());

        tracing::info!(item = %entry.item, quantity = entry.quantity, "Added to cart");
        Ok(entry)
    }

    /// Remove the first entry that is exactly `(item, quantity)`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EntryNotFound`] if no entry matches both the name
    /// (ignoring case) and the quantity.
    #[instrument(skip(self))]
    pub fn remove(
        &self,
        session: &SessionId,
        item: &str,
        quantity: i64,
    ) -> Result<CartEntry, CartError> {
        let not_found = || CartError::EntryNotFound {
            item: item.to_string(),
            quantity,
        };
        let wanted = u32::try_from(quantity).map_err(|_| not_found())?;

        let mut carts = self.carts.write().map_err(|_| CartError::LockPoisoned)?;
        let entries = carts.get_mut(session).ok_or_else(not_found)?;
        let position = entries
            .iter()
            .position(|e| e.is_exactly(item, wanted))
            .ok_or_else(not_found)?;

        let removed = entries.remove(position);
        tracing::info!(item = %removed.item, quantity = removed.quantity, "Removed from cart");
        Ok(removed)
    }

    /// Entries in the session's cart, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LockPoisoned`] if the lock is poisoned.
    pub fn entries(&self, session: &SessionId) -> Result<Vec<CartEntry>, CartError> {
        Ok(self
            .carts
            .read()
            .map_err(|_| CartError::LockPoisoned)?
            .get(session)
            .cloned()
            .unwrap_or_default())
    }

    /// Price every entry in the session's cart against the current inventory.
    ///
    /// Entries whose item can no longer be found are kept with no price.
    ///
    /// # Errors
    ///
    /// Returns an error if either lock is poisoned.
    pub fn view(
        &self,
        inventory: &Inventory,
        session: &SessionId,
    ) -> Result<CartSummary, CartError> {
        let lines = self
            .entries(session)?
            .into_iter()
            .map(|entry| {
                let unit_price = inventory.find_item(&entry.item)?.map(|item| item.price);
                Ok(CartLine { entry, unit_price })
            })
            .collect::<Result<Vec<_>, InventoryError>>()?;
        Ok(CartSummary { lines })
    }

    /// Empty the session's cart, returning what it held.
    ///
    /// The session keeps an (empty) cart afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LockPoisoned`] if the lock is poisoned.
    pub fn take(&self, session: &SessionId) -> Result<Vec<CartEntry>, CartError> {
        Ok(self
            .carts
            .write()
            .map_err(|_| CartError::LockPoisoned)?
            .get_mut(session)
            .map(std::mem::take)
            .unwrap_or_default())
    }
}
