// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::canonical;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::filters::CatalogQuery;
use crate::query_error::QueryError;

/// Search normalization: NFKC then Unicode lowercase, applied to both the
/// needle and every searched field.
#[must_use]
pub fn normalize_search_text(input: &str) -> String {
    input.nfkc().collect::<String>().to_lowercase()
}

#[derive(Serialize)]
struct QueryKey<'a> {
    search: String,
    category: Option<String>,
    platform: Option<String>,
    price_range: Option<&'static str>,
    sort: &'a str,
}

/// Stable cache key for the filtered view. Page and page size are left out
/// because they select a slice of the same result.
pub fn normalized_query_hash(query: &CatalogQuery) -> Result<String, QueryError> {
    let filter = &query.filter;
    let key = QueryKey {
        search: normalize_search_text(filter.search.trim()),
        category: filter.category.as_ref().map(|c| c.as_str().to_ascii_lowercase()),
        platform: filter.platform.as_ref().map(|p| p.as_str().to_ascii_lowercase()),
        price_range: filter.price_range.map(|r| r.as_str()),
        sort: query.sort.as_str(),
    };
    Ok(canonical::stable_json_hash_hex(&key)?)
}
