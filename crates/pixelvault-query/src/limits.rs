// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_page_size: usize,
    pub max_search_len: usize,
    pub max_visible_pages: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_page_size: 48,
            max_search_len: 128,
            max_visible_pages: 5,
        }
    }
}

impl QueryLimits {
    #[must_use]
    pub fn with_max_page_size(max_page_size: usize) -> Self {
        Self {
            max_page_size,
            ..Self::default()
        }
    }
}
