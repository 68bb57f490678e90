// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::ProductId;
use pixelvault_model::{parse_selection, Category, Platform, PriceRange, SortKey, ALL_SELECTION};
use tracing::debug;
use url::form_urlencoded;

use crate::filters::CatalogQuery;

/// Catalog and game-details state carried in a page URL query string.
///
/// Filter selections are two-level: `None` leaves the current filter alone,
/// `Some(None)` is an explicit `all` that clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeepLink {
    pub id: Option<ProductId>,
    pub category: Option<Option<Category>>,
    pub platform: Option<Option<Platform>>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
    pub price_range: Option<Option<PriceRange>>,
}

/// Parses `?id=..&category=..` style query strings. Unknown keys are
/// ignored, as are values that fail to parse.
#[must_use]
pub fn parse_deep_link(query: &str) -> DeepLink {
    let raw = query.trim().trim_start_matches('?');
    let mut link = DeepLink::default();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let value = value.trim();
        match key.as_ref() {
            "id" => link.id = keep("id", value, ProductId::new(value).map(Some)),
            "category" => link.category = keep("category", value, selection(value)),
            "platform" => link.platform = keep("platform", value, selection(value)),
            "price" => link.price_range = keep("price", value, selection(value)),
            "sort" => link.sort = keep("sort", value, value.parse::<SortKey>().map(Some)),
            "page" => {
                link.page = keep("page", value, value.parse::<usize>().map(Some))
                    .filter(|p| *p >= 1);
            }
            "q" | "search" => {
                link.search = (!value.is_empty()).then(|| value.to_string());
            }
            _ => {}
        }
    }
    link
}

fn selection<T: std::str::FromStr>(value: &str) -> Result<Option<Option<T>>, T::Err> {
    parse_selection(value).map(Some)
}

fn keep<T, E: std::fmt::Display>(key: &str, value: &str, parsed: Result<Option<T>, E>) -> Option<T> {
    match parsed {
        Ok(v) => v,
        Err(err) => {
            debug!(key, value, error = %err, "ignoring deep link parameter");
            None
        }
    }
}

impl DeepLink {
    /// Overlays the link onto `query`. The page comes from the link and
    /// defaults to 1.
    pub fn apply_to(&self, query: &mut CatalogQuery) {
        if let Some(category) = &self.category {
            query.filter.category = category.clone();
        }
        if let Some(platform) = &self.platform {
            query.filter.platform = platform.clone();
        }
        if let Some(range) = self.price_range {
            query.filter.price_range = range;
        }
        if let Some(search) = &self.search {
            query.filter.search = search.clone();
        }
        if let Some(sort) = self.sort {
            query.sort = sort;
        }
        query.page = self.page.unwrap_or(1);
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(id) = &self.id {
            out.append_pair("id", id.as_str());
        }
        if let Some(category) = &self.category {
            let value = category.as_ref().map_or(ALL_SELECTION, Category::as_str);
            out.append_pair("category", value);
        }
        if let Some(platform) = &self.platform {
            let value = platform.as_ref().map_or(ALL_SELECTION, Platform::as_str);
            out.append_pair("platform", value);
        }
        if let Some(range) = self.price_range {
            out.append_pair("price", range.map_or(ALL_SELECTION, PriceRange::as_str));
        }
        if let Some(search) = &self.search {
            out.append_pair("q", search);
        }
        if let Some(sort) = self.sort {
            out.append_pair("sort", sort.as_str());
        }
        if let Some(page) = self.page {
            out.append_pair("page", &page.to_string());
        }
        out.finish()
    }
}
