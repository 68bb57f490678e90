// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use pixelvault_model::Product;
use serde_json::json;

pub const CATEGORIES: [&str; 3] = ["RPG", "Racing", "Strategy"];
pub const PLATFORMS: [&str; 3] = ["PC", "PlayStation", "Xbox"];

pub fn product(
    id: &str,
    title: &str,
    category: &str,
    platforms: &[&str],
    price: f64,
    user_score: f64,
    release_date: Option<&str>,
) -> Product {
    serde_json::from_value(json!({
        "uniqueIdentifier": id,
        "title": title,
        "subtitle": format!("{title} subtitle"),
        "description": format!("About {title}"),
        "price": price,
        "category": category,
        "platforms": platforms,
        "tags": [category.to_lowercase()],
        "userScore": user_score,
        "criticScore": user_score * 10.0,
        "releaseDate": release_date,
    }))
    .expect("fixture product")
}

/// Ten products, enough for two pages at the default page size.
pub fn ten_products() -> Vec<Product> {
    (0..10)
        .map(|i| {
            let date = format!("2024-01-{:02}", i + 1);
            product(
                &format!("g{i}"),
                &format!("Game {i}"),
                CATEGORIES[i % 3],
                &[PLATFORMS[i % 3]],
                10.0 + 10.0 * i as f64,
                (i % 7) as f64 + 2.0,
                Some(date.as_str()),
            )
        })
        .collect()
}
