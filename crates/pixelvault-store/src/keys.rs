// SPDX-License-Identifier: Apache-2.0

pub const CART_KEY: &str = "pixelVaultCart";
pub const CHECKOUT_KEY: &str = "pixelVaultCheckout";
pub const NEWSLETTER_KEY: &str = "newsletterSubscriptions";
pub const CONSENT_KEY: &str = "onlineGameFusionLabCookieConsent";
pub const WISHLIST_KEY: &str = "pixelvault_wishlist";

pub const STORAGE_KEYS: [&str; 5] = [
    CART_KEY,
    CHECKOUT_KEY,
    NEWSLETTER_KEY,
    CONSENT_KEY,
    WISHLIST_KEY,
];

/// File name used by the directory backend, or `None` for keys that cannot
/// be mapped safely onto a single path component.
#[must_use]
pub fn key_file_name(key: &str) -> Option<String> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| format!("{key}.json"))
}
