// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::ProductId;
use pixelvault_model::{parse_catalog_json, CatalogDocument, PriceRange, SortKey};

const DATASET: &str = r#"{
  "collectionRoot": {
    "entertainmentItems": [
      {
        "uniqueIdentifier": "nebula-drift",
        "title": "Nebula Drift",
        "subtitle": "Zero-G Racing",
        "description": "Race through asteroid belts.",
        "price": 29.99,
        "originalPrice": 39.99,
        "discountPercentage": 25,
        "category": "Racing",
        "platforms": ["PC", "Xbox"],
        "tags": ["space", "multiplayer"],
        "userScore": 8.1,
        "criticScore": 84,
        "rating": 4.2,
        "releaseDate": "2024-05-01",
        "visualAssets": { "primaryImage": "img/nebula.jpg" },
        "developer": "Orbit Works",
        "features": ["Split screen"],
        "systemRequirements": {
          "minimum": { "os": "Windows 10", "memory": "8 GB" }
        }
      },
      {
        "uniqueIdentifier": "iron-saga",
        "title": "Iron Saga",
        "price": 59.99,
        "category": "RPG",
        "platforms": ["PlayStation"],
        "releaseDate": "2023-10-12",
        "image": "img/iron.jpg"
      }
    ]
  }
}"#;

#[test]
fn dataset_parses_and_validates() {
    let doc = parse_catalog_json(DATASET).expect("catalog");
    assert_eq!(doc.products().len(), 2);

    let drift = doc
        .find(&ProductId::new("nebula-drift").expect("id"))
        .expect("present");
    assert_eq!(drift.developer.as_deref(), Some("Orbit Works"));
    let minimum = drift
        .system_requirements
        .as_ref()
        .and_then(|r| r.minimum.as_ref())
        .expect("minimum");
    assert_eq!(minimum.memory.as_deref(), Some("8 GB"));
    assert!(PriceRange::Under30.contains(drift.price));
}

#[test]
fn document_round_trips_through_canonical_root() {
    let doc = parse_catalog_json(DATASET).expect("catalog");
    let json = serde_json::to_value(&doc).expect("json");
    assert!(json.get("collectionRoot").is_some());
    let back: CatalogDocument = serde_json::from_value(json).expect("reparse");
    assert_eq!(back, doc);
}

#[test]
fn sort_key_is_serialized_by_name() {
    let json = serde_json::to_string(&SortKey::PriceLow).expect("json");
    assert_eq!(json, "\"price-low\"");
    let back: SortKey = serde_json::from_str("\"name\"").expect("alias");
    assert_eq!(back, SortKey::Alphabetical);
}
