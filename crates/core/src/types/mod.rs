//! Core types for Atelier.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod design;
pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod wishlist;

pub use cart::{CartLine, LineKey, add_or_increment, remove_product, set_quantity, subtotal, total_items};
pub use design::{DesignLayer, LayerContent, LayerTransform, MockupView, PrintZone};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, parse_amount};
pub use status::*;
pub use wishlist::{WishlistEntry, contains as wishlist_contains, toggle as wishlist_toggle};
