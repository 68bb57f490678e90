// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Persistence for the storefront.
//!
//! Everything is stored the way a browser's local storage would hold it:
//! one JSON string per key, read fully and written fully on every call.
//! Readers never fail on bad data; they fall back to an empty value and log.

mod backend;
mod cart_store;
mod catalog_source;
mod keys;
mod records;

pub use backend::{KeyValueStorage, LocalFsStorage, MemoryStorage, StoreError, StoreErrorCode};
pub use cart_store::{CartObserver, CartStore, MutationOutcome};
pub use catalog_source::{CatalogSource, FileCatalogSource, StaticCatalogSource};
pub use keys::{
    key_file_name, CART_KEY, CHECKOUT_KEY, CONSENT_KEY, NEWSLETTER_KEY, STORAGE_KEYS,
    WISHLIST_KEY,
};
pub use records::{
    CheckoutStore, ConsentStore, NewsletterStore, SubscribeOutcome, WishlistChange,
    WishlistStore,
};

pub const CRATE_NAME: &str = "pixelvault-store";
