//! Products Data

use crate::domain::products::records::ProductSummaryRecord;

/// Products shown per listing page when the caller does not ask for a size.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// Build a page request, clamping out-of-range values.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.per_page)
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// A page of listed products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductSummaryRecord>,
    pub total: u64,
    pub pagination: Pagination,
}

impl ProductPage {
    #[must_use]
    pub fn last_page(&self) -> u64 {
        let per_page = u64::from(self.pagination.per_page());

        self.total.div_ceil(per_page).max(1)
    }
}
