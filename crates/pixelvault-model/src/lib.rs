// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Storefront data model.
//!
//! Products are read-only records loaded from the static catalog document.
//! Carts, checkout snapshots and newsletter entries are the shapes written
//! to local storage; their JSON field names are part of the storage contract.

mod cart;
mod catalog;
mod checkout;
mod filter;
mod newsletter;
mod product;

pub use cart::{
    format_price, Cart, CartItemInput, CartLine, CartStats, CartTotals, QuantityChange,
    DEFAULT_TAX_RATE,
};
pub use catalog::{parse_catalog_json, CatalogDocument, CollectionRoot};
pub use checkout::{CheckoutSnapshot, ContactInfo, OrderConfirmation};
pub use filter::{parse_selection, Category, Platform, PriceRange, SortKey, ALL_SELECTION};
pub use newsletter::{NewsletterSubscription, SubscriptionStatus};
pub use product::{Product, RequirementSpec, SystemRequirements, VisualAssets};

pub const CRATE_NAME: &str = "pixelvault-model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
