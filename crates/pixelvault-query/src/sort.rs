// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use pixelvault_model::{Product, SortKey};

use crate::normalize::normalize_search_text;

/// Stable sort; ties keep their incoming order, which for a freshly
/// filtered list is dataset order.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Featured => {}
        SortKey::Alphabetical => products.sort_by(|a, b| compare_titles(a, b)),
        SortKey::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Rating => products.sort_by(|a, b| b.user_score.total_cmp(&a.user_score)),
        SortKey::Newest => products.sort_by(|a, b| compare_release(a, b)),
    }
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    normalize_search_text(&a.title)
        .cmp(&normalize_search_text(&b.title))
        .then_with(|| a.title.cmp(&b.title))
}

// Newest first; undated products go last.
fn compare_release(a: &Product, b: &Product) -> Ordering {
    match (a.release_date(), b.release_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
