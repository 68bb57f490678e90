// SPDX-License-Identifier: Apache-2.0

use pixelvault_model::{Category, Platform, PriceRange, Product, SortKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::limits::{QueryLimits, DEFAULT_PAGE_SIZE};
use crate::normalize::normalize_search_text;
use crate::pagination::{get_page, PageInfo};
use crate::query_error::QueryError;
use crate::sort::sort_products;

/// Active predicates. `None` means the dimension is set to "all".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl CatalogFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_none()
            && self.platform.is_none()
            && self.price_range.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    #[serde(default)]
    pub filter: CatalogFilter,
    #[serde(default)]
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            filter: CatalogFilter::default(),
            sort: SortKey::Featured,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One rendered slice of the filtered catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    pub info: PageInfo,
}

pub fn validate_query(query: &CatalogQuery, limits: &QueryLimits) -> Result<(), QueryError> {
    if query.page_size == 0 || query.page_size > limits.max_page_size {
        return Err(QueryError::validation(format!(
            "page_size must be within 1..={}, got {}",
            limits.max_page_size, query.page_size
        )));
    }
    if query.page == 0 {
        return Err(QueryError::validation("page must be at least 1"));
    }
    let search_len = query.filter.search.trim().chars().count();
    if search_len > limits.max_search_len {
        return Err(QueryError::validation(format!(
            "search query exceeds {} characters",
            limits.max_search_len
        )));
    }
    Ok(())
}

/// Conjunction of every active predicate. `needle` is the already
/// normalized search text; an empty needle matches everything.
#[must_use]
pub fn matches_filter(product: &Product, filter: &CatalogFilter, needle: &str) -> bool {
    if let Some(category) = &filter.category {
        if !category.matches(&product.category) {
            return false;
        }
    }
    if let Some(platform) = &filter.platform {
        if !product.platforms.iter().any(|p| platform.matches(p)) {
            return false;
        }
    }
    if let Some(range) = filter.price_range {
        if !range.contains(product.price) {
            return false;
        }
    }
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| normalize_search_text(text).contains(needle);
    hit(&product.title)
        || hit(&product.subtitle)
        || hit(&product.description)
        || product.tags.iter().any(|t| hit(t))
}

/// Filters the full list and orders the survivors by `query.sort`.
#[must_use]
pub fn apply_filters<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = normalize_search_text(query.filter.search.trim());
    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|p| matches_filter(p, &query.filter, &needle))
        .collect();
    sort_products(&mut filtered, query.sort);
    debug!(
        total = products.len(),
        matched = filtered.len(),
        sort = %query.sort,
        "catalog filters applied"
    );
    filtered
}

/// Validates, filters, clamps the requested page into range and slices it.
pub fn run_query<'a>(
    products: &'a [Product],
    query: &CatalogQuery,
    limits: &QueryLimits,
) -> Result<CatalogPage<'a>, QueryError> {
    validate_query(query, limits)?;
    let filtered = apply_filters(products, query);
    let info = PageInfo::new(query.page, query.page_size, filtered.len());
    let items = get_page(&filtered, info.page, info.page_size).to_vec();
    Ok(CatalogPage { items, info })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: f64, tags: &[&str]) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Title {id}"),
            "subtitle": "",
            "description": "",
            "price": price,
            "category": category,
            "platforms": ["PC"],
            "tags": tags,
        }))
        .expect("product")
    }

    #[test]
    fn search_matches_tags() {
        let products = vec![
            product("a", "RPG", 10.0, &["Dragons"]),
            product("b", "RPG", 10.0, &["cars"]),
        ];
        let mut query = CatalogQuery::default();
        query.filter.search = "dragon".to_string();
        let hits = apply_filters(&products, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "a");
    }

    #[test]
    fn whitespace_search_is_skipped() {
        let products = vec![product("a", "RPG", 10.0, &[])];
        let mut query = CatalogQuery::default();
        query.filter.search = "   ".to_string();
        assert_eq!(apply_filters(&products, &query).len(), 1);
    }

    #[test]
    fn oversized_queries_are_rejected() {
        let limits = QueryLimits::default();
        let mut query = CatalogQuery::default();
        query.page_size = 0;
        assert!(validate_query(&query, &limits).is_err());
        query.page_size = 49;
        assert!(validate_query(&query, &limits).is_err());
        query.page_size = 6;
        query.filter.search = "x".repeat(129);
        let err = validate_query(&query, &limits).expect_err("too long");
        assert_eq!(err.code, crate::QueryErrorCode::Validation);
    }

    #[test]
    fn run_query_clamps_out_of_range_page() {
        let products: Vec<Product> = (0..4)
            .map(|i| product(&format!("p{i}"), "RPG", 5.0, &[]))
            .collect();
        let query = CatalogQuery {
            page: 9,
            page_size: 3,
            ..CatalogQuery::default()
        };
        let page = run_query(&products, &query, &QueryLimits::default()).expect("page");
        assert_eq!(page.info.page, 2);
        assert_eq!(page.items.len(), 1);
    }
}
