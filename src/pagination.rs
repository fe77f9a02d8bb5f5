//! Pagination helpers shared by list queries and JSON responses.

use serde::Serialize;

/// Number of items returned per page when the caller does not specify one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Page selection applied to a repository list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

/// A page of results together with paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// 1-based page number of this page.
    pub page: usize,
    /// Total number of pages available.
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wrap a page of items with its position in the full result set.
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}
