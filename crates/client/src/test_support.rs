//! Test doubles shared by the cart and wishlist reconciler tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use atelier_core::{CartLine, ProductId, WishlistEntry, add_or_increment, wishlist_toggle};

use crate::error::SyncError;
use crate::remote::RemoteStore;

/// Scripted remote store.
///
/// Behaves like the real server (same merge helpers from `atelier-core`)
/// and records every call so tests can assert tier exclusivity.
#[derive(Debug, Clone, Default)]
pub struct TestRemote {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    authorized: bool,
    fail_mutations: bool,
    cart: Vec<CartLine>,
    wishlist: Vec<WishlistEntry>,
    mutation_calls: u32,
}

impl TestRemote {
    /// A remote with a valid session and the given server-side state.
    pub fn authorized(cart: Vec<CartLine>, wishlist: Vec<WishlistEntry>) -> Self {
        let remote = Self::default();
        {
            let mut inner = remote.inner.lock().unwrap();
            inner.authorized = true;
            inner.cart = cart;
            inner.wishlist = wishlist;
        }
        remote
    }

    /// A remote with no valid session (every call is a 401).
    pub fn unauthorized() -> Self {
        Self::default()
    }

    /// Make every subsequent mutation fail with a 500.
    pub fn fail_mutations(&self) {
        self.inner.lock().unwrap().fail_mutations = true;
    }

    /// Number of mutation requests received (add, replace, toggle).
    pub fn mutation_calls(&self) -> u32 {
        self.inner.lock().unwrap().mutation_calls
    }

    /// Server-side cart state.
    pub fn server_cart(&self) -> Vec<CartLine> {
        self.inner.lock().unwrap().cart.clone()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Result<R, SyncError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.authorized {
            return Err(SyncError::Unauthorized);
        }
        inner.mutation_calls += 1;
        if inner.fail_mutations {
            return Err(SyncError::Status(500));
        }
        Ok(f(&mut inner))
    }
}

impl RemoteStore for TestRemote {
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, SyncError> {
        let inner = self.inner.lock().unwrap();
        if inner.authorized {
            Ok(inner.cart.clone())
        } else {
            Err(SyncError::Unauthorized)
        }
    }

    async fn replace_cart(&self, lines: &[CartLine]) -> Result<(), SyncError> {
        self.mutate(|inner| inner.cart = lines.to_vec())
    }

    async fn add_cart_line(&self, line: &CartLine) -> Result<(), SyncError> {
        self.mutate(|inner| add_or_increment(&mut inner.cart, line.clone()))
    }

    async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, SyncError> {
        let inner = self.inner.lock().unwrap();
        if inner.authorized {
            Ok(inner.wishlist.clone())
        } else {
            Err(SyncError::Unauthorized)
        }
    }

    async fn toggle_wishlist(&self, product_id: ProductId) -> Result<(), SyncError> {
        self.mutate(|inner| {
            let entry = wishlist_entry_stub(product_id);
            wishlist_toggle(&mut inner.wishlist, entry);
        })
    }
}

/// Build a cart line for tests.
pub fn cart_line(product_id: i32, size: Option<&str>, quantity: u32) -> CartLine {
    CartLine {
        product_id: ProductId::new(product_id),
        title: format!("Tee {product_id}"),
        price: "100.00 MAD".to_string(),
        image_ref: format!("img/{product_id}.webp"),
        quantity,
        selected_size: size.map(String::from),
        selected_color: None,
    }
}

/// Build a wishlist entry for tests.
pub fn wishlist_entry(product_id: i32) -> WishlistEntry {
    WishlistEntry {
        product_id: ProductId::new(product_id),
        title: format!("Hoodie {product_id}"),
        price_display: "299.00 MAD".to_string(),
        image_ref: format!("img/{product_id}.webp"),
        category: "hoodies".to_string(),
    }
}

// The real server re-populates entries from its catalog; the double only
// needs membership to be right.
fn wishlist_entry_stub(product_id: ProductId) -> WishlistEntry {
    wishlist_entry(product_id.as_i32())
}
