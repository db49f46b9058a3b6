//! Shared query parameter types for API handlers.

use serde::Deserialize;
use shelf_core::pagination::PageRequest;

/// Paged, searchable listing parameters (`?page=&per_page=&search=`).
///
/// Pages start at 1. Values out of range are clamped by [`PageRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    /// The search term, if one was given.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
