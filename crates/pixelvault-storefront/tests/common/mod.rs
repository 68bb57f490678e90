// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::cell::Cell;

use pixelvault_model::{CatalogDocument, Product};
use pixelvault_store::{CatalogSource, StoreError, StoreErrorCode};

pub fn catalog() -> CatalogDocument {
    let categories = ["RPG", "Racing", "Strategy"];
    let products: Vec<Product> = (0..10)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "uniqueIdentifier": format!("g{i}"),
                "title": format!("Game {i}"),
                "subtitle": "Deluxe",
                "description": if i == 4 { "A dragon hunting epic" } else { "An adventure" },
                "price": 20.0 + i as f64 * 5.0,
                "category": categories[i % 3],
                "platforms": if i % 2 == 0 { vec!["PC"] } else { vec!["PC", "Xbox"] },
                "tags": ["indie"],
                "userScore": 5.0 + i as f64 / 2.0,
                "criticScore": 70.0 + i as f64,
                "releaseDate": format!("2024-02-{:02}", i + 1),
                "image": format!("img/g{i}.jpg"),
            }))
            .expect("fixture product")
        })
        .collect();
    CatalogDocument::new(products)
}

/// Fails the first `failures` fetches, then serves the fixture catalog.
pub struct FlakySource {
    pub failures: Cell<u32>,
    pub calls: Cell<u32>,
}

impl FlakySource {
    pub fn failing_times(failures: u32) -> Self {
        Self {
            failures: Cell::new(failures),
            calls: Cell::new(0),
        }
    }
}

impl CatalogSource for FlakySource {
    fn fetch_catalog(&self) -> Result<CatalogDocument, StoreError> {
        self.calls.set(self.calls.get() + 1);
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(StoreError::new(StoreErrorCode::Io, "network down"));
        }
        Ok(catalog())
    }
}
