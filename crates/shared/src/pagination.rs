//! Offset pagination helpers for feed-style listings.

use serde::{Deserialize, Serialize};

/// Default page size when none is requested.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Hard cap on page size.
pub const MAX_PER_PAGE: i64 = 50;

/// Page parameters as supplied by the client.
///
/// Pages are 1-based; out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageParams {
    /// Clamps page/per_page into valid ranges against the given cap.
    pub fn clamped(self, max_per_page: i64) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_per_page),
        }
    }

    /// Row offset for the current page.
    ///
    /// Saturates so an absurd `page` cannot overflow into a negative OFFSET.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Row limit for the current page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// A single page of results plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = PageParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_computation() {
        let params = PageParams { page: 3, per_page: 10 };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_clamp_zero_page() {
        let params = PageParams { page: 0, per_page: 10 }.clamped(MAX_PER_PAGE);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_clamp_negative_values() {
        let params = PageParams { page: -5, per_page: -1 }.clamped(MAX_PER_PAGE);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 1);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let params = PageParams { page: i64::MAX, per_page: 10 }.clamped(MAX_PER_PAGE);
        assert_eq!(params.offset(), i64::MAX);
        assert!(params.offset() >= 0);
    }

    #[test]
    fn test_clamp_oversized_per_page() {
        let params = PageParams { page: 1, per_page: 500 }.clamped(MAX_PER_PAGE);
        assert_eq!(params.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_deserialize_defaults() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_paginated_envelope() {
        let params = PageParams { page: 2, per_page: 5 };
        let page = Paginated::new(vec![1, 2, 3], 13, params);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 13);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 5);
    }
}
