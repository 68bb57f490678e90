// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::ProductId;
use pixelvault_model::{
    Cart, CartItemInput, CartStats, CartTotals, Product, QuantityChange, DEFAULT_TAX_RATE,
};
use tracing::{debug, warn};

use crate::backend::{read_json_or_default, write_json, KeyValueStorage};
use crate::keys::CART_KEY;

/// Notified after every call that changed the cart, with the cart as
/// persisted (or as it would have been, when the write failed).
pub trait CartObserver {
    fn cart_changed(&self, cart: &Cart, change: QuantityChange);
}

impl<F: Fn(&Cart, QuantityChange)> CartObserver for F {
    fn cart_changed(&self, cart: &Cart, change: QuantityChange) {
        self(cart, change);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    pub change: QuantityChange,
    /// False when the write-through failed; the mutation still happened in
    /// memory but the next reader will not see it.
    pub persisted: bool,
}

/// Write-through cart over a single storage key. Nothing is cached: every
/// call re-reads the stored cart, so several stores over the same storage
/// behave like independent pages.
pub struct CartStore<S> {
    storage: S,
    tax_rate: f64,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KeyValueStorage> CartStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_tax_rate(storage, DEFAULT_TAX_RATE)
    }

    #[must_use]
    pub fn with_tax_rate(storage: S, tax_rate: f64) -> Self {
        Self {
            storage,
            tax_rate,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn load(&self) -> Cart {
        read_json_or_default(&self.storage, CART_KEY)
    }

    pub fn add_item(&self, item: CartItemInput) -> MutationOutcome {
        let product_id = item.id.clone();
        let outcome = self.mutate(|cart| cart.add_item(item));
        debug!(product_id = %product_id, change = ?outcome.change, "cart add");
        outcome
    }

    pub fn add_product(&self, product: &Product) -> MutationOutcome {
        self.add_item(CartItemInput::from(product))
    }

    /// `quantity <= 0` removes the line.
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> MutationOutcome {
        let outcome = self.mutate(|cart| cart.set_quantity(id, quantity));
        debug!(product_id = %id, quantity, change = ?outcome.change, "cart set quantity");
        outcome
    }

    pub fn remove_item(&self, id: &ProductId) -> MutationOutcome {
        let outcome = self.mutate(|cart| cart.remove(id));
        debug!(product_id = %id, change = ?outcome.change, "cart remove");
        outcome
    }

    /// Drops the stored cart entirely.
    pub fn clear(&self) -> MutationOutcome {
        let mut cart = self.load();
        let change = if cart.is_empty() {
            QuantityChange::Unchanged
        } else {
            QuantityChange::Removed
        };
        cart.clear();
        let persisted = match self.storage.remove_item(CART_KEY) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = CART_KEY, error = %err, "cart clear was not persisted");
                false
            }
        };
        self.notify(&cart, change);
        MutationOutcome { change, persisted }
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.load().totals(self.tax_rate)
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.load().item_count()
    }

    #[must_use]
    pub fn stats(&self) -> CartStats {
        self.load().stats()
    }

    fn mutate(&self, op: impl FnOnce(&mut Cart) -> QuantityChange) -> MutationOutcome {
        let mut cart = self.load();
        let change = op(&mut cart);
        if !change.is_change() {
            return MutationOutcome {
                change,
                persisted: true,
            };
        }
        let persisted = match write_json(&self.storage, CART_KEY, &cart) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = CART_KEY, error = %err, "cart write was not persisted");
                false
            }
        };
        self.notify(&cart, change);
        MutationOutcome { change, persisted }
    }

    fn notify(&self, cart: &Cart, change: QuantityChange) {
        if !change.is_change() {
            return;
        }
        for observer in &self.observers {
            observer.cart_changed(cart, change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn item(id: &str, price: f64) -> CartItemInput {
        CartItemInput {
            id: ProductId::new(id).expect("id"),
            title: id.to_string(),
            price,
            image: String::new(),
        }
    }

    #[test]
    fn malformed_cart_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "{not json").expect("seed");
        let store = CartStore::new(storage.clone());
        assert!(store.load().is_empty());

        store.add_item(item("g1", 5.0));
        let raw = storage.get_item(CART_KEY).expect("get").expect("present");
        assert!(raw.contains("\"g1\""));
    }

    #[test]
    fn noop_mutation_does_not_write() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.clone());
        let outcome = store.remove_item(&ProductId::new("ghost").expect("id"));
        assert_eq!(outcome.change, QuantityChange::Unchanged);
        assert!(storage.keys().is_empty());
    }
}
