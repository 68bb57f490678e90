// SPDX-License-Identifier: Apache-2.0

mod common;

use pixelvault_model::Category;
use pixelvault_query::{
    apply_filters, get_page, run_query, CatalogQuery, PageInfo, QueryLimits,
};

#[test]
fn ten_products_split_six_and_four() {
    let products = common::ten_products();
    let query = CatalogQuery::default();
    let filtered = apply_filters(&products, &query);
    let info = PageInfo::new(1, 6, filtered.len());
    assert_eq!(info.total_pages, 2);
    assert_eq!(get_page(&filtered, 1, 6).len(), 6);
    assert_eq!(get_page(&filtered, 2, 6).len(), 4);
}

#[test]
fn shrinking_filter_pulls_page_back_to_one() {
    let products = common::ten_products();
    let limits = QueryLimits::default();
    let mut query = CatalogQuery {
        page: 2,
        ..CatalogQuery::default()
    };
    let page = run_query(&products, &query, &limits).expect("page two");
    assert_eq!(page.info.page, 2);

    // g2, g5, g8 are the Strategy titles.
    query.filter.category = Some(Category::parse("Strategy").expect("category"));
    let page = run_query(&products, &query, &limits).expect("filtered");
    assert_eq!(page.info.total_items, 3);
    assert_eq!(page.info.total_pages, 1);
    assert_eq!(page.info.page, 1);
    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["g2", "g5", "g8"]);
}

#[test]
fn input_order_is_untouched_by_sorting() {
    let products = common::ten_products();
    let before: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
    let query = CatalogQuery {
        sort: pixelvault_model::SortKey::PriceHigh,
        ..CatalogQuery::default()
    };
    let sorted = apply_filters(&products, &query);
    assert_eq!(sorted[0].id.as_str(), "g9");
    let after: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(before, after);
}
