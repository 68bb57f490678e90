// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog filter/sort/paginate engine.
//!
//! Every function here is pure over the full, immutable product list: the
//! filtered view is recomputed from scratch for each state change and the
//! input slice is never reordered.

mod deep_link;
mod featured;
mod filters;
mod limits;
mod normalize;
mod pagination;
mod query_error;
mod sort;

pub use deep_link::{parse_deep_link, DeepLink};
pub use featured::{
    new_releases, recommendations, similar, trending, trending_score, NEW_RELEASES_COUNT,
    RECOMMENDATIONS_COUNT, SIMILAR_COUNT, TRENDING_COUNT,
};
pub use filters::{
    apply_filters, matches_filter, run_query, validate_query, CatalogFilter, CatalogPage,
    CatalogQuery,
};
pub use limits::{QueryLimits, DEFAULT_PAGE_SIZE};
pub use normalize::{normalize_search_text, normalized_query_hash};
pub use pagination::{
    clamp_page, display_range, get_page, pagination_window, total_pages, PageInfo,
};
pub use query_error::{QueryError, QueryErrorCode};
pub use sort::sort_products;

pub const CRATE_NAME: &str = "pixelvault-query";
