// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use pixelvault_core::ProductId;
use pixelvault_model::{CheckoutSnapshot, NewsletterSubscription, Product};
use serde::Deserialize;
use tracing::{info, warn};

use crate::backend::{read_json_or_default, write_json, KeyValueStorage, StoreError};
use crate::keys::{CHECKOUT_KEY, CONSENT_KEY, NEWSLETTER_KEY, WISHLIST_KEY};

/// Hand-off from the cart page to the checkout page.
pub struct CheckoutStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> CheckoutStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, snapshot: &CheckoutSnapshot) -> Result<(), StoreError> {
        write_json(&self.storage, CHECKOUT_KEY, snapshot)
    }

    #[must_use]
    pub fn load(&self) -> Option<CheckoutSnapshot> {
        read_json_or_default(&self.storage, CHECKOUT_KEY)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove_item(CHECKOUT_KEY)
    }
}

// Early builds logged bare email strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSubscription {
    Record(NewsletterSubscription),
    Email(String),
}

impl From<StoredSubscription> for NewsletterSubscription {
    fn from(value: StoredSubscription) -> Self {
        match value {
            StoredSubscription::Record(record) => record,
            StoredSubscription::Email(email) => {
                NewsletterSubscription::subscribed(email, DateTime::<Utc>::default())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

/// Append-only subscription log. Callers validate the address first.
pub struct NewsletterStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> NewsletterStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn list(&self) -> Vec<NewsletterSubscription> {
        let stored: Vec<StoredSubscription> = read_json_or_default(&self.storage, NEWSLETTER_KEY);
        stored.into_iter().map(Into::into).collect()
    }

    pub fn subscribe(
        &self,
        email: &str,
        date: DateTime<Utc>,
    ) -> Result<SubscribeOutcome, StoreError> {
        let mut entries = self.list();
        if entries.iter().any(|e| e.matches_email(email)) {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        entries.push(NewsletterSubscription::subscribed(email.trim(), date));
        write_json(&self.storage, NEWSLETTER_KEY, &entries)?;
        info!(subscribers = entries.len(), "newsletter subscription recorded");
        Ok(SubscribeOutcome::Subscribed)
    }
}

pub struct ConsentStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> ConsentStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Only the exact string `"true"` counts as consent.
    #[must_use]
    pub fn has_consented(&self) -> bool {
        match self.storage.get_item(CONSENT_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(key = CONSENT_KEY, error = %err, "consent flag unreadable");
                false
            }
        }
    }

    pub fn accept(&self) -> Result<(), StoreError> {
        self.storage.set_item(CONSENT_KEY, "true")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
    AlreadyPresent,
    Absent,
}

/// Product records saved from the game details page, unique by id.
pub struct WishlistStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> WishlistStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        let mut stored: Vec<Product> = read_json_or_default(&self.storage, WISHLIST_KEY);
        let mut seen = std::collections::BTreeSet::new();
        stored.retain(|p| seen.insert(p.id.clone()));
        stored
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.list().iter().any(|p| &p.id == id)
    }

    pub fn add(&self, product: &Product) -> Result<WishlistChange, StoreError> {
        let mut items = self.list();
        if items.iter().any(|p| p.id == product.id) {
            return Ok(WishlistChange::AlreadyPresent);
        }
        items.push(product.clone());
        write_json(&self.storage, WISHLIST_KEY, &items)?;
        Ok(WishlistChange::Added)
    }

    pub fn remove(&self, id: &ProductId) -> Result<WishlistChange, StoreError> {
        let mut items = self.list();
        let before = items.len();
        items.retain(|p| &p.id != id);
        if items.len() == before {
            return Ok(WishlistChange::Absent);
        }
        write_json(&self.storage, WISHLIST_KEY, &items)?;
        Ok(WishlistChange::Removed)
    }

    /// The details page button: adds when absent, removes when present.
    pub fn toggle(&self, product: &Product) -> Result<WishlistChange, StoreError> {
        match self.add(product)? {
            WishlistChange::AlreadyPresent => self.remove(&product.id),
            other => Ok(other),
        }
    }
}
