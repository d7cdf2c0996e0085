//! Wishlist entry type and set-membership helpers.
//!
//! Unlike the cart, the wishlist is a set keyed by product alone: presence
//! is boolean, there is no quantity, and adding an already-present product
//! removes it (toggle).

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub title: String,
    /// Display price as shown in the catalog.
    pub price_display: String,
    pub image_ref: String,
    pub category: String,
}

/// Toggle an entry's membership. Returns `true` if the entry was added,
/// `false` if it was removed.
pub fn toggle(entries: &mut Vec<WishlistEntry>, entry: WishlistEntry) -> bool {
    if contains(entries, entry.product_id) {
        entries.retain(|e| e.product_id != entry.product_id);
        false
    } else {
        entries.push(entry);
        true
    }
}

/// Set-membership test by product.
#[must_use]
pub fn contains(entries: &[WishlistEntry], product_id: ProductId) -> bool {
    entries.iter().any(|e| e.product_id == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(product_id: i32) -> WishlistEntry {
        WishlistEntry {
            product_id: ProductId::new(product_id),
            title: format!("Hoodie {product_id}"),
            price_display: "299.00 MAD".to_string(),
            image_ref: "img/hoodie.webp".to_string(),
            category: "hoodies".to_string(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut entries = Vec::new();
        assert!(toggle(&mut entries, entry(1)));
        assert!(contains(&entries, ProductId::new(1)));
        assert!(!toggle(&mut entries, entry(1)));
        assert!(!contains(&entries, ProductId::new(1)));
    }

    #[test]
    fn test_toggle_involution() {
        let mut entries = vec![entry(2)];
        let before = entries.clone();
        toggle(&mut entries, entry(3));
        toggle(&mut entries, entry(3));
        assert_eq!(entries, before);
    }

    #[test]
    fn test_serde_wire_shape() {
        let e = entry(5);
        let json = serde_json::to_value(&e).expect("serialize");
        assert_eq!(json["productId"], 5);
        assert_eq!(json["priceDisplay"], "299.00 MAD");
        assert_eq!(json["category"], "hoodies");
    }
}
