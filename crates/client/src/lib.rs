//! Atelier sync engine - dual-tier cart and wishlist state.
//!
//! A storefront session holds its cart and wishlist in exactly one of two
//! storage tiers:
//!
//! - *Guest tier*: the collection lives only in a local key-value store
//!   (the browser-profile analogue), invisible to the server.
//! - *Authenticated tier*: the collection lives in the server record for
//!   the session's user; the local store is never written.
//!
//! The tier is resolved once, when [`CartReconciler::init`] /
//! [`WishlistReconciler::init`] performs the initial remote fetch: success
//! means a valid session exists (Authenticated), any failure falls back to
//! Guest. After that the tier is fixed for the reconciler's lifetime -
//! logging in mid-session requires constructing a fresh reconciler, the
//! page-reload analogue.
//!
//! Every remote-synced mutation is optimistic: local state changes first,
//! and a failed remote call restores the pre-mutation snapshot exactly.
//! Failures are logged, never surfaced, never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_client::{CartReconciler, FileStore, HttpRemote};
//!
//! let base_url = "https://shop.example/".parse()?;
//! let remote = HttpRemote::new(&base_url)?;
//! let local = FileStore::new(profile_dir)?;
//! let mut cart = CartReconciler::new(remote, local);
//! cart.init().await;
//! cart.add_line(line).await;
//! println!("{} items, {} MAD", cart.total_items(), cart.subtotal());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cart;
mod error;
mod local;
mod remote;
mod undo;
mod wishlist;

pub use cart::CartReconciler;
pub use error::SyncError;
pub use local::{CART_KEY, FileStore, LocalStore, MemoryStore, WISHLIST_KEY};
pub use remote::{HttpRemote, RemoteStore};
pub use wishlist::WishlistReconciler;

/// Which storage system owns the authoritative copy of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Initialization has not run yet; no writes are permitted.
    Unresolved,
    /// Local store only; the server never sees this session's collections.
    Guest,
    /// Server record only; the local store is not written.
    Authenticated,
}

#[cfg(test)]
mod test_support;
