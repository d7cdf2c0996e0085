//! Wishlist reconciler.
//!
//! Set-membership variant of the cart reconciler: entries are keyed by
//! product alone, the only mutation is a toggle, and membership tests are
//! O(1) through a product-id index kept alongside the entry list.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use atelier_core::{ProductId, WishlistEntry, wishlist_toggle};

use crate::Tier;
use crate::error::SyncError;
use crate::local::{LocalStore, WISHLIST_KEY};
use crate::remote::RemoteStore;
use crate::undo::Snapshot;

/// Session-scoped wishlist state with dual-tier persistence.
///
/// Same lifecycle as [`crate::CartReconciler`]: construct once per
/// session, [`init`](Self::init) resolves the tier, and the tier stays
/// fixed until a fresh reconciler is built (e.g. after login).
pub struct WishlistReconciler<R, L> {
    remote: R,
    local: L,
    tier: Tier,
    entries: Vec<WishlistEntry>,
    index: HashSet<ProductId>,
}

impl<R: RemoteStore, L: LocalStore> WishlistReconciler<R, L> {
    /// Create an unresolved reconciler over the two stores.
    #[must_use]
    pub fn new(remote: R, local: L) -> Self {
        Self {
            remote,
            local,
            tier: Tier::Unresolved,
            entries: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Resolve the storage tier and adopt the initial entry set.
    #[instrument(skip(self))]
    pub async fn init(&mut self) {
        match self.remote.fetch_wishlist().await {
            Ok(entries) => {
                self.tier = Tier::Authenticated;
                self.entries = entries;
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    warn!(error = %e, "wishlist fetch failed, falling back to guest tier");
                }
                self.tier = Tier::Guest;
                self.entries = self.read_local();
            }
        }
        self.rebuild_index();
        debug!(tier = ?self.tier, entries = self.entries.len(), "wishlist initialized");
    }

    /// Toggle membership for the entry's product.
    ///
    /// Optimistic: the local set flips immediately. Authenticated tier
    /// sends a single toggle keyed by product id (the server decides add
    /// vs. remove); a failure restores the pre-toggle set. Guest tier
    /// persists the full set after every toggle.
    #[instrument(skip(self, entry), fields(product_id = %entry.product_id))]
    pub async fn toggle(&mut self, entry: WishlistEntry) {
        if self.tier == Tier::Unresolved {
            warn!("wishlist mutation before init is a no-op");
            return;
        }
        let product_id = entry.product_id;
        let snapshot = Snapshot::capture(&self.entries);
        wishlist_toggle(&mut self.entries, entry);
        self.rebuild_index();

        match self.tier {
            Tier::Authenticated => {
                if let Err(e) = self.remote.toggle_wishlist(product_id).await {
                    warn!(error = %e, "remote wishlist toggle failed, rolling back");
                    snapshot.restore(&mut self.entries);
                    self.rebuild_index();
                }
            }
            Tier::Guest => self.persist_local(),
            Tier::Unresolved => {}
        }
    }

    /// O(1) membership test.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.index.contains(&product_id)
    }

    /// Current entries.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Resolved storage tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    fn rebuild_index(&mut self) {
        self.index = self.entries.iter().map(|e| e.product_id).collect();
    }

    /// Guest tier: write the full set, synchronously with the mutation.
    fn persist_local(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(SyncError::from)
            .and_then(|json| self.local.write(WISHLIST_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist local wishlist");
        }
    }

    /// Read and parse the locally persisted set; anything wrong means empty.
    fn read_local(&self) -> Vec<WishlistEntry> {
        let raw = match self.local.read(WISHLIST_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read local wishlist");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "corrupt local wishlist, starting empty");
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
    use crate::test_support::{TestRemote, wishlist_entry};

    async fn guest_wishlist() -> (WishlistReconciler<TestRemote, MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let mut wishlist = WishlistReconciler::new(TestRemote::unauthorized(), store.clone());
        wishlist.init().await;
        assert_eq!(wishlist.tier(), Tier::Guest);
        (wishlist, store)
    }

    #[tokio::test]
    async fn test_init_adopts_remote_set() {
        let remote = TestRemote::authorized(Vec::new(), vec![wishlist_entry(1)]);
        let mut wishlist = WishlistReconciler::new(remote, MemoryStore::new());
        wishlist.init().await;

        assert_eq!(wishlist.tier(), Tier::Authenticated);
        assert!(wishlist.is_in_wishlist(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_toggle_involution() {
        let (mut wishlist, _) = guest_wishlist().await;
        wishlist.toggle(wishlist_entry(2)).await;
        let after_first = wishlist.entries().to_vec();

        wishlist.toggle(wishlist_entry(5)).await;
        wishlist.toggle(wishlist_entry(5)).await;

        assert_eq!(wishlist.entries(), after_first.as_slice());
        assert!(!wishlist.is_in_wishlist(ProductId::new(5)));
        assert!(wishlist.is_in_wishlist(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_toggle_rollback_on_remote_failure() {
        let remote = TestRemote::authorized(Vec::new(), vec![wishlist_entry(1)]);
        let mut wishlist = WishlistReconciler::new(remote.clone(), MemoryStore::new());
        wishlist.init().await;
        let before = wishlist.entries().to_vec();

        remote.fail_mutations();
        wishlist.toggle(wishlist_entry(9)).await;

        assert_eq!(wishlist.entries(), before.as_slice());
        assert!(!wishlist.is_in_wishlist(ProductId::new(9)));
        assert!(wishlist.is_in_wishlist(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_guest_toggle_persists_every_time() {
        let (mut wishlist, store) = guest_wishlist().await;

        wishlist.toggle(wishlist_entry(1)).await;
        let persisted: Vec<WishlistEntry> =
            serde_json::from_str(&store.read(WISHLIST_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);

        wishlist.toggle(wishlist_entry(1)).await;
        let persisted: Vec<WishlistEntry> =
            serde_json::from_str(&store.read(WISHLIST_KEY).unwrap().unwrap()).unwrap();
        assert!(persisted.is_empty());
    }

    #[tokio::test]
    async fn test_guest_roundtrip_through_reinit() {
        let (mut wishlist, store) = guest_wishlist().await;
        wishlist.toggle(wishlist_entry(3)).await;

        let mut reloaded = WishlistReconciler::new(TestRemote::unauthorized(), store);
        reloaded.init().await;
        assert!(reloaded.is_in_wishlist(ProductId::new(3)));
    }

    #[tokio::test]
    async fn test_tier_exclusivity() {
        let remote = TestRemote::unauthorized();
        let mut wishlist = WishlistReconciler::new(remote.clone(), MemoryStore::new());
        wishlist.init().await;
        wishlist.toggle(wishlist_entry(1)).await;
        assert_eq!(remote.mutation_calls(), 0);

        let remote = TestRemote::authorized(Vec::new(), Vec::new());
        let store = MemoryStore::new();
        let mut wishlist = WishlistReconciler::new(remote.clone(), store.clone());
        wishlist.init().await;
        wishlist.toggle(wishlist_entry(1)).await;
        assert_eq!(remote.mutation_calls(), 1);
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_local_set_is_empty() {
        let store = MemoryStore::new();
        store.seed(WISHLIST_KEY, "[{\"productId\":");
        let mut wishlist = WishlistReconciler::new(TestRemote::unauthorized(), store);
        wishlist.init().await;
        assert!(wishlist.entries().is_empty());
    }
}
