//! Page-number pagination used by the list endpoints.
//!
//! Pages start at 1. Values are normalised here so repositories can bind the
//! resulting `LIMIT`/`OFFSET` without further checks.

/// Items per page when the caller does not ask for a specific size.
pub const DEFAULT_PER_PAGE: i64 = 8;

/// Upper bound on `per_page` for any list endpoint.
pub const MAX_PER_PAGE: i64 = 100;

/// Highest page number accepted; keeps the computed offset within `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

/// A normalised page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Build a page request from raw query values.
    ///
    /// Page numbers below 1 fall back to 1 and are capped at [`MAX_PAGE`].
    /// `per_page` below 1 falls back to [`DEFAULT_PER_PAGE`] and is capped at
    /// [`MAX_PER_PAGE`].
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1).min(MAX_PAGE);
        let per_page = per_page
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Rows to take.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Turn an optional search string into a SQL `ILIKE` pattern.
///
/// Blank input means "no filter" and yields `None`. `%`, `_` and `\` are
/// escaped so user input only ever matches literally.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}
