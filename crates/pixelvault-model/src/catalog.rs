// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use pixelvault_core::ProductId;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::ValidationError;

/// The static dataset: `{ "collectionRoot": { "entertainmentItems": [...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(alias = "digitalEntertainmentCollection")]
    pub collection_root: CollectionRoot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRoot {
    #[serde(default)]
    pub entertainment_items: Vec<Product>,
}

impl CatalogDocument {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            collection_root: CollectionRoot {
                entertainment_items: products,
            },
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.collection_root.entertainment_items
    }

    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.collection_root.entertainment_items
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Every duplicate id and every product breaking its pricing rules, in
    /// dataset order. Loading tolerates these; `validate` does not.
    #[must_use]
    pub fn issues(&self) -> Vec<ValidationError> {
        let mut seen = BTreeSet::new();
        let mut issues = Vec::new();
        for product in self.products() {
            if !seen.insert(product.id.as_str()) {
                issues.push(ValidationError(format!(
                    "duplicate product id {} in catalog",
                    product.id
                )));
            }
            if let Err(e) = product.validate() {
                issues.push(e);
            }
        }
        issues
    }

    /// Ids must be unique and every product must satisfy its pricing rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.issues().into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

/// Parses the dataset shape only. Record-level consistency is checked by
/// [`CatalogDocument::validate`].
pub fn parse_catalog_json(raw: &str) -> Result<CatalogDocument, ValidationError> {
    serde_json::from_str(raw).map_err(|e| ValidationError(format!("catalog json: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_root_name_is_accepted() {
        let raw = r#"{"digitalEntertainmentCollection":{"entertainmentItems":[
            {"uniqueIdentifier":"g1","title":"A","price":10,"category":"RPG"}
        ]}}"#;
        let doc = parse_catalog_json(raw).expect("parse");
        assert_eq!(doc.products().len(), 1);
    }

    #[test]
    fn duplicate_ids_parse_but_fail_validation() {
        let raw = r#"{"collectionRoot":{"entertainmentItems":[
            {"uniqueIdentifier":"g1","title":"A","price":10,"category":"RPG"},
            {"uniqueIdentifier":"g1","title":"B","price":12,"category":"RPG"}
        ]}}"#;
        let doc = parse_catalog_json(raw).expect("parse");
        assert_eq!(doc.products().len(), 2);
        let err = doc.validate().expect_err("duplicate");
        assert!(err.0.contains("duplicate product id g1"));
    }

    #[test]
    fn pricing_mismatch_is_reported_without_dropping_products() {
        let raw = r#"{"collectionRoot":{"entertainmentItems":[
            {"uniqueIdentifier":"g1","title":"A","price":10,"category":"RPG"},
            {"uniqueIdentifier":"g2","title":"B","price":49.99,"originalPrice":59.99,
             "discountPercentage":0,"category":"RPG"}
        ]}}"#;
        let doc = parse_catalog_json(raw).expect("parse");
        assert_eq!(doc.products().len(), 2);
        let issues = doc.issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].0.contains("product g2 has no discount"));
    }

    #[test]
    fn ids_with_spaces_load() {
        let raw = r#"{"collectionRoot":{"entertainmentItems":[
            {"uniqueIdentifier":"cyber quest","title":"Cyber Quest","price":20,"category":"RPG"}
        ]}}"#;
        let doc = parse_catalog_json(raw).expect("parse");
        let id = ProductId::new("cyber quest").expect("id");
        assert_eq!(doc.find(&id).map(|p| p.title.as_str()), Some("Cyber Quest"));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_catalog_json("{not json").expect_err("malformed");
        assert!(err.0.starts_with("catalog json:"));
    }
}
