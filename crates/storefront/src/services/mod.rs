//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Per-session shopping carts (add, remove, view)
//! - `orders` - Order placement against the inventory

pub mod cart;
pub mod orders;

pub use cart::{CartError, CartLine, CartStore, CartSummary};
pub use orders::{OrderError, OrderReceipt, place_order};
