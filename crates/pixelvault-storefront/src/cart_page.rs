// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::{Clock, ProductId};
use pixelvault_model::{CartTotals, CheckoutSnapshot, Product, QuantityChange};
use pixelvault_query::{recommendations, RECOMMENDATIONS_COUNT};
use pixelvault_store::{CartStore, CatalogSource, CheckoutStore, KeyValueStorage};
use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, StorefrontErrorCode};
use crate::newsletter::millis_to_utc;
use crate::notifications::{NotificationKind, Notifications};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub item_label: String,
    pub checkout_enabled: bool,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPageAction {
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    AddRecommendation(ProductId),
    ProceedToCheckout,
}

/// Result of pressing the checkout button.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutHandoff {
    Navigate(CheckoutSnapshot),
    EmptyCart,
}

fn item_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

pub struct CartPage<S, C> {
    cart: CartStore<S>,
    checkout: CheckoutStore<S>,
    notifications: Notifications<C>,
    catalog: Vec<Product>,
}

impl<S, C> CartPage<S, C>
where
    S: KeyValueStorage + Clone,
    C: Clock,
{
    #[must_use]
    pub fn new(storage: S, clock: C, config: &StorefrontConfig) -> Self {
        Self {
            cart: CartStore::with_tax_rate(storage.clone(), config.tax_rate),
            checkout: CheckoutStore::new(storage),
            notifications: Notifications::new(clock, config.notification_ttl()),
            catalog: Vec::new(),
        }
    }

    /// Loads products for the recommendation strip. A failed fetch only
    /// hides the strip.
    pub fn load_recommendation_source(&mut self, source: &impl CatalogSource) {
        match source.fetch_catalog() {
            Ok(doc) => self.catalog = doc.into_products(),
            Err(err) => {
                warn!(error = %err, "recommendations unavailable");
                self.catalog.clear();
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> CartView {
        let cart = self.cart.load();
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                id: line.id.clone(),
                title: line.title.clone(),
                image: line.image.clone(),
                unit_price: line.price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect::<Vec<_>>();
        CartView {
            checkout_enabled: !lines.is_empty(),
            totals: cart.totals(self.cart.tax_rate()),
            item_label: item_label(cart.item_count()),
            lines,
        }
    }

    pub fn recommendations<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Product> {
        recommendations(&self.catalog, &self.cart.load(), RECOMMENDATIONS_COUNT, rng)
    }

    pub fn dispatch(
        &mut self,
        action: CartPageAction,
    ) -> Result<Option<CheckoutHandoff>, StorefrontError> {
        match action {
            CartPageAction::Increment(id) => self.step_quantity(&id, 1),
            CartPageAction::Decrement(id) => self.step_quantity(&id, -1),
            CartPageAction::Remove(id) => {
                if self.cart.remove_item(&id).change.is_change() {
                    self.notifications
                        .push("Item removed from cart", NotificationKind::Info);
                }
                Ok(None)
            }
            CartPageAction::AddRecommendation(id) => {
                let product = self.catalog.iter().find(|p| p.id == id).ok_or_else(|| {
                    StorefrontError::new(
                        StorefrontErrorCode::NotFound,
                        format!("unknown product {id}"),
                    )
                })?;
                let outcome = self.cart.add_product(product);
                self.notifications
                    .push_cart_outcome(&outcome, format!("{} added to cart!", product.title));
                Ok(None)
            }
            CartPageAction::ProceedToCheckout => self.proceed_to_checkout().map(Some),
        }
    }

    /// Writes the hand-off snapshot, or explains that the cart is empty.
    pub fn proceed_to_checkout(&mut self) -> Result<CheckoutHandoff, StorefrontError> {
        let cart = self.cart.load();
        if cart.is_empty() {
            self.notifications
                .push("Your cart is empty!", NotificationKind::Info);
            return Ok(CheckoutHandoff::EmptyCart);
        }
        let now = millis_to_utc(self.notifications.now_millis());
        let snapshot = CheckoutSnapshot::capture(&cart, now);
        self.checkout.save(&snapshot)?;
        Ok(CheckoutHandoff::Navigate(snapshot))
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications<C> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications<C> {
        &mut self.notifications
    }

    fn step_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<Option<CheckoutHandoff>, StorefrontError> {
        let Some(line) = self.cart.load().get(id).cloned() else {
            return Err(StorefrontError::new(
                StorefrontErrorCode::NotFound,
                format!("{id} is not in the cart"),
            ));
        };
        let outcome = self
            .cart
            .set_quantity(id, i64::from(line.quantity) + delta);
        if !outcome.persisted {
            self.notifications
                .push_cart_outcome(&outcome, "Quantity updated successfully!");
        } else if outcome.change == QuantityChange::Removed {
            self.notifications
                .push("Item removed from cart", NotificationKind::Info);
        } else if outcome.change.is_change() {
            self.notifications
                .push("Quantity updated successfully!", NotificationKind::Success);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_pluralize() {
        assert_eq!(item_label(0), "0 items");
        assert_eq!(item_label(1), "1 item");
        assert_eq!(item_label(3), "3 items");
    }
}
