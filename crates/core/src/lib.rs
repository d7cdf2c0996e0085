//! Atelier Core - Shared types library.
//!
//! This crate provides common types used across all Atelier components:
//! - `server` - Storefront + admin JSON API
//! - `client` - Cart/wishlist sync engine
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere, including the sync engine's test doubles.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, cart/wishlist lines, statuses,
//!   and the design-studio schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
