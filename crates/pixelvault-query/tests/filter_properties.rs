// SPDX-License-Identifier: Apache-2.0

mod common;

use pixelvault_model::{Category, Platform, PriceRange, Product, SortKey};
use pixelvault_query::{
    apply_filters, clamp_page, sort_products, total_pages, CatalogFilter, CatalogQuery, PageInfo,
};
use proptest::prelude::*;

fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (0usize..3, 0usize..3, 0u32..120, 0u32..100, prop::option::of(1u32..28)),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (c, p, price, score, day))| {
                let date = day.map(|d| format!("2023-02-{d:02}"));
                common::product(
                    &format!("p{i}"),
                    &format!("Title {}", (i * 7) % 11),
                    common::CATEGORIES[c],
                    &[common::PLATFORMS[p]],
                    f64::from(price) / 2.0,
                    f64::from(score) / 10.0,
                    date.as_deref(),
                )
            })
            .collect()
    })
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_query() -> impl Strategy<Value = CatalogQuery> {
    (
        prop::option::of(0usize..3),
        prop::option::of(0usize..3),
        prop::option::of(prop::sample::select(PriceRange::ALL.to_vec())),
        prop::sample::select(vec!["", "title 3", "rpg", "ABOUT", "zzz"]),
        arb_sort(),
    )
        .prop_map(|(c, p, price_range, search, sort)| CatalogQuery {
            filter: CatalogFilter {
                search: search.to_string(),
                category: c.map(|i| Category::parse(common::CATEGORIES[i]).expect("category")),
                platform: p.map(|i| Platform::parse(common::PLATFORMS[i]).expect("platform")),
                price_range,
            },
            sort,
            ..CatalogQuery::default()
        })
}

proptest! {
    #[test]
    fn result_is_a_subset_honouring_every_predicate(
        products in arb_products(),
        query in arb_query(),
    ) {
        let out = apply_filters(&products, &query);
        let needle = query.filter.search.trim().to_lowercase();
        for p in &out {
            prop_assert!(products.iter().any(|q| q.id == p.id));
            if let Some(c) = &query.filter.category {
                prop_assert!(c.matches(&p.category));
            }
            if let Some(pl) = &query.filter.platform {
                prop_assert!(p.platforms.iter().any(|x| pl.matches(x)));
            }
            if let Some(r) = query.filter.price_range {
                prop_assert!(r.contains(p.price));
            }
            if !needle.is_empty() {
                let hay = [&p.title, &p.subtitle, &p.description]
                    .iter()
                    .map(|s| s.to_lowercase())
                    .chain(p.tags.iter().map(|t| t.to_lowercase()))
                    .any(|s| s.contains(&needle));
                prop_assert!(hay);
            }
        }
    }

    #[test]
    fn featured_order_is_a_subsequence(products in arb_products(), mut query in arb_query()) {
        query.sort = SortKey::Featured;
        let out = apply_filters(&products, &query);
        let positions: Vec<usize> = out
            .iter()
            .map(|p| products.iter().position(|q| q.id == p.id).expect("present"))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filtering_is_idempotent(products in arb_products(), query in arb_query()) {
        let a: Vec<_> = apply_filters(&products, &query).iter().map(|p| p.id.clone()).collect();
        let b: Vec<_> = apply_filters(&products, &query).iter().map(|p| p.id.clone()).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sorting_reaches_a_fixed_point(products in arb_products(), sort in arb_sort()) {
        let mut once: Vec<&Product> = products.iter().collect();
        sort_products(&mut once, sort);
        let mut twice = once.clone();
        sort_products(&mut twice, sort);
        let a: Vec<_> = once.iter().map(|p| &p.id).collect();
        let b: Vec<_> = twice.iter().map(|p| &p.id).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn page_stays_in_range_after_any_filter(
        products in arb_products(),
        query in arb_query(),
        start_page in 1usize..10,
        page_size in 1usize..8,
    ) {
        let unfiltered = PageInfo::new(start_page, page_size, products.len());
        let filtered = apply_filters(&products, &query);
        let info = PageInfo::new(unfiltered.page, page_size, filtered.len());
        let pages = total_pages(filtered.len(), page_size);
        prop_assert!(info.page >= 1);
        prop_assert!(info.page <= pages.max(1));
        prop_assert_eq!(info.page, clamp_page(unfiltered.page, pages));
    }
}
