//! Pagination state.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde::{Deserialize, Serialize};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Allowed page sizes for the footer selector.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// 0-based page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page_index: 0, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    #[must_use]
    pub fn new(page_index: usize, page_size: usize) -> Self {
        // A zero page size would make every offset/page-count computation
        // divide by zero; fall back to the default instead.
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self { page_index, page_size }
    }

    /// Row offset of this page's first row.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }

    /// Number of pages needed for `total` rows. An empty result set still
    /// renders one (empty) page.
    #[must_use]
    pub fn page_count(&self, total: u64) -> usize {
        let total = usize::try_from(total).unwrap_or(usize::MAX);
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Clamp the page index to the last page for `total` rows, e.g. after a
    /// filter change shrank the result set.
    #[must_use]
    pub fn clamp_to(&self, total: u64) -> Self {
        let last = self.page_count(total) - 1;
        Self { page_index: self.page_index.min(last), page_size: self.page_size }
    }

    /// Switch page size, returning to the first page so the user is not
    /// dropped at a far-away offset.
    #[must_use]
    pub fn with_page_size(&self, page_size: usize) -> Self {
        Self::new(0, page_size)
    }
}
