//! Cart reconciler.
//!
//! Owns the session's cart lines and keeps them synchronized with
//! whichever storage tier the session resolved to. See the crate docs for
//! the tier model; see [`crate::undo::Snapshot`] for the rollback contract.

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use atelier_core::{
    CartLine, ProductId, add_or_increment, remove_product, set_quantity, subtotal, total_items,
};

use crate::Tier;
use crate::error::SyncError;
use crate::local::{CART_KEY, LocalStore};
use crate::remote::RemoteStore;
use crate::undo::Snapshot;

/// Session-scoped cart state with dual-tier persistence.
///
/// Construct one per session and call [`init`](Self::init) exactly once
/// before any mutation. The tier resolved at init is fixed for this
/// instance's lifetime; after a mid-session login, build a fresh
/// reconciler to adopt the server-side cart (guest-held items stay in the
/// local store untouched).
pub struct CartReconciler<R, L> {
    remote: R,
    local: L,
    tier: Tier,
    items: Vec<CartLine>,
}

impl<R: RemoteStore, L: LocalStore> CartReconciler<R, L> {
    /// Create an unresolved reconciler over the two stores.
    pub const fn new(remote: R, local: L) -> Self {
        Self {
            remote,
            local,
            tier: Tier::Unresolved,
            items: Vec::new(),
        }
    }

    /// Resolve the storage tier and adopt the initial line list.
    ///
    /// A successful remote fetch resolves to Authenticated and adopts the
    /// server's list verbatim. Any failure resolves to Guest and falls
    /// back to locally persisted items; corrupt or missing local data
    /// degrades to an empty cart, never a crash.
    #[instrument(skip(self))]
    pub async fn init(&mut self) {
        match self.remote.fetch_cart().await {
            Ok(lines) => {
                self.tier = Tier::Authenticated;
                self.items = lines;
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    warn!(error = %e, "cart fetch failed, falling back to guest tier");
                }
                self.tier = Tier::Guest;
                self.items = self.read_local();
            }
        }
        debug!(tier = ?self.tier, lines = self.items.len(), "cart initialized");
    }

    /// Add a line, merging by identity key (product, size, color).
    ///
    /// Optimistic: local state changes immediately; a failed remote add
    /// restores the pre-mutation list.
    #[instrument(skip(self, line), fields(product_id = %line.product_id))]
    pub async fn add_line(&mut self, mut line: CartLine) {
        let Some(snapshot) = self.begin_mutation() else {
            return;
        };
        line.clamp_quantity();
        add_or_increment(&mut self.items, line.clone());

        match self.tier {
            Tier::Authenticated => {
                if let Err(e) = self.remote.add_cart_line(&line).await {
                    warn!(error = %e, "remote cart add failed, rolling back");
                    snapshot.restore(&mut self.items);
                }
            }
            Tier::Guest => self.persist_local(),
            Tier::Unresolved => {}
        }
    }

    /// Remove every line for `product_id`, regardless of size or color.
    ///
    /// Removal is deliberately keyed by product alone (not the full
    /// identity key); see `atelier_core::remove_product`.
    #[instrument(skip(self))]
    pub async fn remove_line(&mut self, product_id: ProductId) {
        let Some(snapshot) = self.begin_mutation() else {
            return;
        };
        remove_product(&mut self.items, product_id);
        self.push_full(snapshot).await;
    }

    /// Set the quantity of every line for `product_id`.
    ///
    /// Quantities below 1 never change the cart: a decrement past the
    /// floor is a no-op, not a removal.
    #[instrument(skip(self))]
    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            debug!("ignoring quantity update below 1");
            return;
        }
        let Some(snapshot) = self.begin_mutation() else {
            return;
        };
        set_quantity(&mut self.items, product_id, quantity);
        self.push_full(snapshot).await;
    }

    /// Empty the cart.
    ///
    /// The remote push is fire-and-forget: the cart stays empty locally
    /// even if the push fails. In the Guest tier the storage key is
    /// deleted rather than written as `[]`.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        if self.tier == Tier::Unresolved {
            warn!("cart mutation before init is a no-op");
            return;
        }
        self.items.clear();
        match self.tier {
            Tier::Authenticated => {
                if let Err(e) = self.remote.replace_cart(&self.items).await {
                    warn!(error = %e, "remote cart clear failed");
                }
            }
            Tier::Guest => {
                if let Err(e) = self.local.remove(CART_KEY) {
                    warn!(error = %e, "failed to delete local cart");
                }
            }
            Tier::Unresolved => {}
        }
    }

    /// Current lines.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Resolved storage tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        total_items(&self.items)
    }

    /// Sum of line totals, parsed out of the display prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal(&self.items)
    }

    /// Gate a mutation on initialization and capture the undo snapshot.
    fn begin_mutation(&mut self) -> Option<Snapshot<CartLine>> {
        if self.tier == Tier::Unresolved {
            warn!("cart mutation before init is a no-op");
            return None;
        }
        Some(Snapshot::capture(&self.items))
    }

    /// Reconcile a full-replace mutation with the resolved tier.
    async fn push_full(&mut self, snapshot: Snapshot<CartLine>) {
        match self.tier {
            Tier::Authenticated => {
                if let Err(e) = self.remote.replace_cart(&self.items).await {
                    warn!(error = %e, "remote cart replace failed, rolling back");
                    snapshot.restore(&mut self.items);
                }
            }
            Tier::Guest => self.persist_local(),
            Tier::Unresolved => {}
        }
    }

    /// Guest tier: write the full list, synchronously with the mutation.
    fn persist_local(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(SyncError::from)
            .and_then(|json| self.local.write(CART_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist local cart");
        }
    }

    /// Read and parse locally persisted lines; anything wrong means empty.
    fn read_local(&self) -> Vec<CartLine> {
        let raw = match self.local.read(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read local cart");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "corrupt local cart, starting empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::local::MemoryStore;
    use crate::test_support::{TestRemote, cart_line};
    use rust_decimal::Decimal;

    async fn guest_cart() -> (CartReconciler<TestRemote, MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let mut cart = CartReconciler::new(TestRemote::unauthorized(), store.clone());
        cart.init().await;
        assert_eq!(cart.tier(), Tier::Guest);
        (cart, store)
    }

    async fn authed_cart(
        server_lines: Vec<CartLine>,
    ) -> (CartReconciler<TestRemote, MemoryStore>, TestRemote, MemoryStore) {
        let remote = TestRemote::authorized(server_lines, Vec::new());
        let store = MemoryStore::new();
        let mut cart = CartReconciler::new(remote.clone(), store.clone());
        cart.init().await;
        assert_eq!(cart.tier(), Tier::Authenticated);
        (cart, remote, store)
    }

    #[tokio::test]
    async fn test_init_adopts_remote_when_authorized() {
        let server = vec![cart_line(1, Some("M"), 2)];
        let (cart, _, _) = authed_cart(server.clone()).await;
        assert_eq!(cart.items(), server.as_slice());
    }

    #[tokio::test]
    async fn test_init_falls_back_to_local_when_unauthorized() {
        let store = MemoryStore::new();
        let persisted = vec![cart_line(4, None, 1)];
        store.seed(CART_KEY, &serde_json::to_string(&persisted).unwrap());

        let mut cart = CartReconciler::new(TestRemote::unauthorized(), store);
        cart.init().await;
        assert_eq!(cart.tier(), Tier::Guest);
        assert_eq!(cart.items(), persisted.as_slice());
    }

    #[tokio::test]
    async fn test_init_with_corrupt_local_data_is_empty() {
        let store = MemoryStore::new();
        store.seed(CART_KEY, "{not json!");

        let mut cart = CartReconciler::new(TestRemote::unauthorized(), store);
        cart.init().await;
        assert_eq!(cart.tier(), Tier::Guest);
        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn test_add_merges_by_identity_key() {
        let (mut cart, _) = guest_cart().await;
        cart.add_line(cart_line(1, Some("M"), 1)).await;
        cart.add_line(cart_line(1, Some("M"), 2)).await;
        cart.add_line(cart_line(1, Some("L"), 1)).await;

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_items(), 4);
    }

    #[tokio::test]
    async fn test_quantity_floor() {
        let (mut cart, _) = guest_cart().await;
        cart.add_line(cart_line(1, None, 2)).await;
        let before = cart.items().to_vec();

        cart.update_quantity(ProductId::new(1), 0).await;
        assert_eq!(cart.items(), before.as_slice());

        cart.update_quantity(ProductId::new(1), 5).await;
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_tier_exclusivity_authenticated_never_touches_local() {
        let (mut cart, remote, store) = authed_cart(Vec::new()).await;
        cart.add_line(cart_line(1, None, 1)).await;
        cart.update_quantity(ProductId::new(1), 3).await;
        cart.remove_line(ProductId::new(1)).await;

        assert!(store.keys().is_empty(), "local store written in authed tier");
        assert_eq!(remote.mutation_calls(), 3);
    }

    #[tokio::test]
    async fn test_tier_exclusivity_guest_never_calls_remote() {
        let remote = TestRemote::unauthorized();
        let mut cart = CartReconciler::new(remote.clone(), MemoryStore::new());
        cart.init().await;

        cart.add_line(cart_line(1, None, 1)).await;
        cart.update_quantity(ProductId::new(1), 2).await;
        cart.remove_line(ProductId::new(1)).await;
        cart.clear().await;

        assert_eq!(remote.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_rollback_on_failed_add() {
        let (mut cart, remote, _) = authed_cart(vec![cart_line(1, Some("M"), 1)]).await;
        let before = cart.items().to_vec();

        remote.fail_mutations();
        cart.add_line(cart_line(2, None, 1)).await;

        assert_eq!(cart.items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_rollback_on_failed_replace() {
        let (mut cart, remote, _) = authed_cart(vec![cart_line(1, Some("M"), 2)]).await;
        let before = cart.items().to_vec();

        remote.fail_mutations();
        cart.update_quantity(ProductId::new(1), 9).await;
        assert_eq!(cart.items(), before.as_slice());

        cart.remove_line(ProductId::new(1)).await;
        assert_eq!(cart.items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_clear_is_fire_and_forget() {
        let (mut cart, remote, _) = authed_cart(vec![cart_line(1, None, 1)]).await;
        remote.fail_mutations();
        cart.clear().await;
        // Unlike the other mutations, a failed clear does not roll back.
        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn test_clear_deletes_guest_key() {
        let (mut cart, store) = guest_cart().await;
        cart.add_line(cart_line(1, None, 1)).await;
        assert_eq!(store.keys(), vec![CART_KEY.to_string()]);

        cart.clear().await;
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_subtotal_parses_formatted_prices() {
        let (mut cart, _) = guest_cart().await;
        let mut a = cart_line(1, None, 2);
        a.price = "19.99 MAD".to_string();
        let mut b = cart_line(2, None, 1);
        b.price = "$5.00".to_string();

        cart.add_line(a).await;
        cart.add_line(b).await;
        assert_eq!(cart.subtotal(), Decimal::new(4498, 2));
    }

    #[tokio::test]
    async fn test_guest_persistence_roundtrip() {
        let (mut cart, store) = guest_cart().await;
        let line = cart_line(3, Some("XL"), 2);
        cart.add_line(line.clone()).await;

        // A fresh reconciler over the same profile reproduces the line.
        let mut reloaded = CartReconciler::new(TestRemote::unauthorized(), store);
        reloaded.init().await;
        assert!(reloaded.items().contains(&line));
    }

    #[tokio::test]
    async fn test_removal_scope_covers_all_variants() {
        let (mut cart, _) = guest_cart().await;
        cart.add_line(cart_line(7, Some("M"), 1)).await;
        cart.add_line(cart_line(7, Some("L"), 1)).await;
        cart.add_line(cart_line(8, None, 1)).await;

        cart.remove_line(ProductId::new(7)).await;
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, ProductId::new(8));
    }

    #[tokio::test]
    async fn test_mutation_before_init_is_noop() {
        let mut cart = CartReconciler::new(TestRemote::unauthorized(), MemoryStore::new());
        cart.add_line(cart_line(1, None, 1)).await;
        assert!(cart.items().is_empty());
        assert_eq!(cart.tier(), Tier::Unresolved);
    }

    #[tokio::test]
    async fn test_authenticated_add_converges_with_server() {
        let (mut cart, remote, _) = authed_cart(vec![cart_line(1, Some("M"), 1)]).await;
        cart.add_line(cart_line(1, Some("M"), 2)).await;

        assert_eq!(cart.items(), remote.server_cart().as_slice());
    }
}
