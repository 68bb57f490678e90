// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use pixelvault_model::{Cart, Product};
use rand::seq::SliceRandom;
use rand::Rng;

pub const TRENDING_COUNT: usize = 6;
pub const NEW_RELEASES_COUNT: usize = 3;
pub const SIMILAR_COUNT: usize = 3;
pub const RECOMMENDATIONS_COUNT: usize = 4;

/// Blends the 0-10 user score with the 0-100 critic score.
#[must_use]
pub fn trending_score(product: &Product) -> f64 {
    (product.user_score + product.critic_score / 10.0) / 2.0
}

#[must_use]
pub fn trending(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| trending_score(b).total_cmp(&trending_score(a)));
    ranked.truncate(limit);
    ranked
}

#[must_use]
pub fn new_releases(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| match (a.release_date(), b.release_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.truncate(limit);
    ranked
}

/// Same category as `product`, in dataset order, never `product` itself.
#[must_use]
pub fn similar<'a>(products: &'a [Product], product: &Product, limit: usize) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.id != product.id && p.category.eq_ignore_ascii_case(&product.category))
        .take(limit)
        .collect()
}

/// Random picks among products that are not already in the cart.
pub fn recommendations<'a, R: Rng + ?Sized>(
    products: &'a [Product],
    cart: &Cart,
    limit: usize,
    rng: &mut R,
) -> Vec<&'a Product> {
    let candidates: Vec<&Product> = products.iter().filter(|p| !cart.contains(&p.id)).collect();
    candidates.choose_multiple(rng, limit).copied().collect()
}
