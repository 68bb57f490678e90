// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::Clock;
use pixelvault_model::Product;
use pixelvault_query::{similar, DeepLink, SIMILAR_COUNT};
use pixelvault_store::{
    CartStore, CatalogSource, KeyValueStorage, MutationOutcome, WishlistChange, WishlistStore,
};
use tracing::warn;

use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, StorefrontErrorCode};
use crate::notifications::{NotificationKind, Notifications};

const NOT_FOUND_MESSAGE: &str = "Game not found.";
const LOAD_FAILED_MESSAGE: &str = "Could not load game data.";

#[derive(Debug, Clone, PartialEq)]
pub enum GameDetailsView<'a> {
    Error {
        message: &'static str,
    },
    Ready {
        product: &'a Product,
        similar: Vec<&'a Product>,
        in_wishlist: bool,
    },
}

enum Resolved {
    Pending,
    Missing(&'static str),
    Found(usize),
}

/// The `game-details?id=...` page.
pub struct GameDetails<S, C> {
    cart: CartStore<S>,
    wishlist: WishlistStore<S>,
    notifications: Notifications<C>,
    products: Vec<Product>,
    resolved: Resolved,
}

impl<S, C> GameDetails<S, C>
where
    S: KeyValueStorage + Clone,
    C: Clock,
{
    #[must_use]
    pub fn new(storage: S, clock: C, config: &StorefrontConfig) -> Self {
        Self {
            cart: CartStore::with_tax_rate(storage.clone(), config.tax_rate),
            wishlist: WishlistStore::new(storage),
            notifications: Notifications::new(clock, config.notification_ttl()),
            products: Vec::new(),
            resolved: Resolved::Pending,
        }
    }

    /// Resolves the link's `id` against a fresh catalog fetch.
    pub fn open(&mut self, source: &impl CatalogSource, link: &DeepLink) {
        let Some(id) = &link.id else {
            self.resolved = Resolved::Missing(NOT_FOUND_MESSAGE);
            return;
        };
        match source.fetch_catalog() {
            Ok(doc) => {
                self.products = doc.into_products();
                self.resolved = match self.products.iter().position(|p| &p.id == id) {
                    Some(index) => Resolved::Found(index),
                    None => {
                        warn!(product_id = %id, "game details requested for unknown id");
                        Resolved::Missing(LOAD_FAILED_MESSAGE)
                    }
                };
            }
            Err(err) => {
                warn!(error = %err, "game details could not load catalog");
                self.products.clear();
                self.resolved = Resolved::Missing(LOAD_FAILED_MESSAGE);
            }
        }
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match self.resolved {
            Resolved::Found(index) => self.products.get(index),
            _ => None,
        }
    }

    /// `None` until [`GameDetails::open`] has run.
    #[must_use]
    pub fn view(&self) -> Option<GameDetailsView<'_>> {
        match self.resolved {
            Resolved::Pending => None,
            Resolved::Missing(message) => Some(GameDetailsView::Error { message }),
            Resolved::Found(_) => {
                let product = self.product()?;
                Some(GameDetailsView::Ready {
                    product,
                    similar: similar(&self.products, product, SIMILAR_COUNT),
                    in_wishlist: self.wishlist.contains(&product.id),
                })
            }
        }
    }

    pub fn add_to_cart(&mut self) -> Result<MutationOutcome, StorefrontError> {
        let outcome = {
            let product = self.current()?;
            self.cart.add_product(product)
        };
        self.notifications
            .push_cart_outcome(&outcome, "Game added to cart!");
        Ok(outcome)
    }

    /// Adds the game to the wishlist, or takes it out again when it is
    /// already there.
    pub fn toggle_wishlist(&mut self) -> Result<WishlistChange, StorefrontError> {
        let change = {
            let product = self.current()?;
            self.wishlist.toggle(product)?
        };
        match change {
            WishlistChange::Added => self
                .notifications
                .push("Game added to wishlist!", NotificationKind::Success),
            _ => self
                .notifications
                .push("Game removed from wishlist!", NotificationKind::Info),
        };
        Ok(change)
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications<C> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications<C> {
        &mut self.notifications
    }

    fn current(&self) -> Result<&Product, StorefrontError> {
        self.product().ok_or_else(|| {
            StorefrontError::new(StorefrontErrorCode::NotFound, NOT_FOUND_MESSAGE)
        })
    }
}
