// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

#[must_use]
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// Pulls `page` into `[1, max(1, total_pages)]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Items `[(page-1)*page_size, page*page_size)`, empty past the end.
#[must_use]
pub fn get_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PageInfo {
    /// The requested page is clamped against the pages that actually exist.
    #[must_use]
    pub fn new(requested_page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        Self {
            page: clamp_page(requested_page, total_pages),
            page_size,
            total_items,
            total_pages,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn display_range(&self) -> Option<(usize, usize)> {
        display_range(self.page, self.page_size, self.total_items)
    }
}

/// 1-based `(first, last)` positions shown on `page`, or `None` when the page
/// holds nothing.
#[must_use]
pub fn display_range(page: usize, page_size: usize, filtered_len: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }
    let start = (page - 1).saturating_mul(page_size).saturating_add(1);
    if start > filtered_len {
        return None;
    }
    let end = start.saturating_add(page_size - 1).min(filtered_len);
    Some((start, end))
}

/// Up to `max_visible` consecutive page numbers centred on `current`,
/// shifted left when the window would run past the last page.
#[must_use]
pub fn pagination_window(current: usize, total: usize, max_visible: usize) -> Vec<usize> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_centres_and_shifts() {
        assert_eq!(pagination_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(pagination_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(pagination_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(pagination_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert!(pagination_window(1, 0, 5).is_empty());
    }

    #[test]
    fn display_range_is_one_based() {
        assert_eq!(display_range(1, 6, 10), Some((1, 6)));
        assert_eq!(display_range(2, 6, 10), Some((7, 10)));
        assert_eq!(display_range(3, 6, 10), None);
        assert_eq!(display_range(1, 6, 0), None);
    }

    #[test]
    fn get_page_past_end_is_empty() {
        let items = [1, 2, 3];
        assert_eq!(get_page(&items, 1, 2), &[1, 2]);
        assert_eq!(get_page(&items, 2, 2), &[3]);
        assert!(get_page(&items, 3, 2).is_empty());
        assert!(get_page(&items, 0, 2).is_empty());
    }

    #[test]
    fn empty_result_still_reports_page_one() {
        let info = PageInfo::new(3, 6, 0);
        assert_eq!(info.page, 1);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next());
        assert!(!info.has_previous());
    }
}
