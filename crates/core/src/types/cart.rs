//! Cart line type and identity-key merge helpers.
//!
//! The same merge semantics run on both sides of the sync boundary: the
//! client applies them optimistically, and the server applies them when
//! handling an add-or-increment request. Keeping them here guarantees the
//! two sides can never disagree about what "the same line" means.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::parse_amount;

/// A single cart line.
///
/// Two lines are "the same line" when their [`LineKey`] matches: same
/// product AND same selected size AND same selected color. Two lines with
/// the same product but different variants coexist as distinct lines.
///
/// Invariant: `quantity` is at least 1. A decrement below 1 is a no-op,
/// never a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    /// Display price as shown in the catalog, e.g. "199.00 MAD".
    pub price: String,
    pub image_ref: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartLine {
    /// The identity key of this line: (product, size, color).
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.selected_size.clone(),
            color: self.selected_color.clone(),
        }
    }

    /// Numeric unit price parsed out of the display string.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        parse_amount(&self.price)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    /// Raise a zero quantity to the floor of 1.
    ///
    /// Used when accepting lines from the wire; locally-built lines already
    /// hold the invariant.
    pub fn clamp_quantity(&mut self) {
        if self.quantity == 0 {
            self.quantity = 1;
        }
    }
}

/// Identity key deciding whether two cart lines merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Merge a new line into the list by identity key.
///
/// If a line with the same key exists its quantity is incremented by the
/// new line's quantity (the existing line's display fields win); otherwise
/// the new line is appended.
pub fn add_or_increment(lines: &mut Vec<CartLine>, new: CartLine) {
    let key = new.key();
    if let Some(existing) = lines.iter_mut().find(|l| l.key() == key) {
        existing.quantity = existing.quantity.saturating_add(new.quantity);
    } else {
        lines.push(new);
    }
}

/// Remove every line for the given product, regardless of size or color.
///
/// Removal is keyed by product alone while add/update key by the full
/// variant tuple; removing one variant therefore removes all of them. That
/// asymmetry is long-standing observable behavior and is kept as-is.
pub fn remove_product(lines: &mut Vec<CartLine>, product_id: ProductId) {
    lines.retain(|l| l.product_id != product_id);
}

/// Set the quantity of every line for the given product.
///
/// Quantities below 1 violate the line invariant; callers reject those
/// before reaching here.
pub fn set_quantity(lines: &mut [CartLine], product_id: ProductId, quantity: u32) {
    for line in lines.iter_mut().filter(|l| l.product_id == product_id) {
        line.quantity = quantity;
    }
}

/// Total number of items across all lines (sum of quantities).
#[must_use]
pub fn total_items(lines: &[CartLine]) -> u32 {
    lines.iter().map(|l| l.quantity).sum()
}

/// Sum of line totals.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product_id: i32, size: Option<&str>, color: Option<&str>, qty: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            title: format!("Tee {product_id}"),
            price: "100.00 MAD".to_string(),
            image_ref: "img/tee.webp".to_string(),
            quantity: qty,
            selected_size: size.map(String::from),
            selected_color: color.map(String::from),
        }
    }

    #[test]
    fn test_add_merges_same_key() {
        let mut lines = vec![line(1, Some("M"), None, 1)];
        add_or_increment(&mut lines, line(1, Some("M"), None, 2));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_add_keeps_distinct_variants() {
        let mut lines = vec![line(1, Some("M"), None, 1)];
        add_or_increment(&mut lines, line(1, Some("L"), None, 1));
        add_or_increment(&mut lines, line(1, Some("M"), Some("black"), 1));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_identity_key_uniqueness_over_sequences() {
        // Arbitrary interleaving of adds never produces two lines with the
        // same key, and per-key quantity equals the sum of added quantities.
        let adds = [
            (1, Some("M"), None, 1),
            (2, None, None, 4),
            (1, Some("M"), None, 2),
            (1, Some("L"), None, 1),
            (2, None, None, 1),
            (1, Some("M"), None, 1),
        ];
        let mut lines = Vec::new();
        for (pid, size, color, qty) in adds {
            add_or_increment(&mut lines, line(pid, size, color, qty));
        }

        let mut seen = std::collections::HashSet::new();
        for l in &lines {
            assert!(seen.insert(l.key()), "duplicate key in {lines:?}");
        }

        let m_line = lines
            .iter()
            .find(|l| l.selected_size.as_deref() == Some("M"))
            .unwrap();
        assert_eq!(m_line.quantity, 4);
        let p2_line = lines
            .iter()
            .find(|l| l.product_id == ProductId::new(2))
            .unwrap();
        assert_eq!(p2_line.quantity, 5);
    }

    #[test]
    fn test_remove_is_keyed_by_product_alone() {
        let mut lines = vec![
            line(7, Some("M"), None, 1),
            line(7, Some("L"), None, 1),
            line(8, None, None, 1),
        ];
        remove_product(&mut lines, ProductId::new(7));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, ProductId::new(8));
    }

    #[test]
    fn test_totals() {
        let lines = vec![
            CartLine {
                price: "19.99 MAD".to_string(),
                quantity: 2,
                ..line(1, None, None, 2)
            },
            CartLine {
                price: "$5.00".to_string(),
                quantity: 1,
                ..line(2, None, None, 1)
            },
        ];
        assert_eq!(total_items(&lines), 3);
        assert_eq!(subtotal(&lines), Decimal::new(4498, 2));
    }

    #[test]
    fn test_serde_wire_shape() {
        let l = line(3, Some("XL"), None, 2);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["productId"], 3);
        assert_eq!(json["selectedSize"], "XL");
        assert!(json.get("selectedColor").is_none());
        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_clamp_quantity() {
        let mut l = line(1, None, None, 1);
        l.quantity = 0;
        l.clamp_quantity();
        assert_eq!(l.quantity, 1);
        l.quantity = 5;
        l.clamp_quantity();
        assert_eq!(l.quantity, 5);
    }
}
