// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::ProductId;
use serde::{Deserialize, Serialize};

use crate::product::Product;

pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// One persisted cart entry. `quantity` is never zero once it reaches a [`Cart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(alias = "uniqueIdentifier")]
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// The fields copied from a product when it first enters the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemInput {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl From<&Product> for CartItemInput {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.primary_image().to_string(),
        }
    }
}

/// What a mutation did to the line it targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Inserted,
    Updated { quantity: u32 },
    Removed,
    Unchanged,
}

impl QuantityChange {
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartStats {
    pub item_count: u64,
    pub unique_items: usize,
    pub total_value: f64,
    pub average_price: f64,
}

/// Insertion-ordered cart lines, unique by product id.
///
/// Deserialization normalizes hand-edited storage: zero-quantity lines are
/// dropped and repeated ids are merged by summing their quantities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl From<Vec<CartLine>> for Cart {
    fn from(raw: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(raw.len());
        for line in raw.into_iter().filter(|l| l.quantity > 0) {
            match lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Increments an existing line or appends a new one with quantity 1.
    pub fn add_item(&mut self, item: CartItemInput) -> QuantityChange {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return QuantityChange::Updated {
                quantity: line.quantity,
            };
        }
        self.lines.push(CartLine {
            id: item.id,
            title: item.title,
            price: item.price,
            image: item.image,
            quantity: 1,
        });
        QuantityChange::Inserted
    }

    /// A quantity of zero or below removes the line. Positive values are
    /// taken as given, saturating at `u32::MAX`.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> QuantityChange {
        if quantity <= 0 {
            return self.remove(id);
        }
        let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) else {
            return QuantityChange::Unchanged;
        };
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if line.quantity == quantity {
            return QuantityChange::Unchanged;
        }
        line.quantity = quantity;
        QuantityChange::Updated { quantity }
    }

    pub fn remove(&mut self, id: &ProductId) -> QuantityChange {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        if self.lines.len() == before {
            QuantityChange::Unchanged
        } else {
            QuantityChange::Removed
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn totals(&self, tax_rate: f64) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * tax_rate;
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Sum of quantities; the figure shown on the navigation cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[must_use]
    pub fn stats(&self) -> CartStats {
        let item_count = self.item_count();
        let total_value = self.subtotal();
        let average_price = if item_count == 0 {
            0.0
        } else {
            total_value / item_count as f64
        };
        CartStats {
            item_count,
            unique_items: self.lines.len(),
            total_value,
            average_price,
        }
    }
}

/// Two-decimal dollar rendering used by every price label.
#[must_use]
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, price: f64) -> CartItemInput {
        CartItemInput {
            id: ProductId::new(id).expect("id"),
            title: format!("Game {id}"),
            price,
            image: String::new(),
        }
    }

    #[test]
    fn repeated_add_increments_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(input("g1", 20.0)), QuantityChange::Inserted);
        assert_eq!(
            cart.add_item(input("g1", 20.0)),
            QuantityChange::Updated { quantity: 2 }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn non_positive_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(input("g1", 20.0));
        let id = ProductId::new("g1").expect("id");
        assert_eq!(cart.set_quantity(&id, -3), QuantityChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.set_quantity(&id, 0), QuantityChange::Unchanged);
    }

    #[test]
    fn set_quantity_on_missing_line_is_a_noop() {
        let mut cart = Cart::new();
        let id = ProductId::new("ghost").expect("id");
        assert_eq!(cart.set_quantity(&id, 4), QuantityChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn stored_json_is_normalized_on_read() {
        let raw = r#"[
            {"id":"g1","title":"A","price":10.0,"image":"a.jpg","quantity":1},
            {"id":"g2","title":"B","price":5.0,"quantity":0},
            {"uniqueIdentifier":"g1","title":"A","price":10.0,"quantity":2}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).expect("cart json");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].image, "a.jpg");
    }

    #[test]
    fn cart_serializes_as_plain_array() {
        let mut cart = Cart::new();
        cart.add_item(input("g1", 12.5));
        let json = serde_json::to_value(&cart).expect("json");
        assert_eq!(
            json,
            serde_json::json!([
                {"id":"g1","title":"Game g1","price":12.5,"image":"","quantity":1}
            ])
        );
    }

    #[test]
    fn stats_average_over_units() {
        let mut cart = Cart::new();
        cart.add_item(input("g1", 10.0));
        cart.add_item(input("g1", 10.0));
        cart.add_item(input("g2", 40.0));
        let stats = cart.stats();
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.unique_items, 2);
        assert!((stats.total_value - 60.0).abs() < 1e-9);
        assert!((stats.average_price - 20.0).abs() < 1e-9);
        assert_eq!(Cart::new().stats().average_price, 0.0);
    }

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(40.0), "$40.00");
        assert_eq!(format_price(3.2), "$3.20");
        assert_eq!(format_price(43.199_999), "$43.20");
    }
}
