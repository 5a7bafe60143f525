//! Pixel Store Core - Shared domain types.
//!
//! The storefront builds its inventory, carts and orders from these types;
//! catalog files and JSON responses are their serde forms.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no locking, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Items, categories, prices, sessions, cart entries and order lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
