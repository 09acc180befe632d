//! This module defines the common functionality for paging ledger data.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated pagination request: a 1-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    items: u64,
}

impl Pagination {
    /// Validate a pagination request.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidPageNumber] if `page` is zero,
    /// - [Error::InvalidPageSize] if `items` is zero.
    pub fn new(page: u64, items: u64) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::InvalidPageNumber);
        }

        if items < 1 {
            return Err(Error::InvalidPageSize);
        }

        Ok(Self { page, items })
    }

    /// Resolve the request into the window to apply to a query.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            limit: self.items,
            offset: (self.page - 1) * self.items,
        }
    }
}

/// The `LIMIT`/`OFFSET` pair resolved from a [Pagination] request.
///
/// Stores apply the window as given; validation happens when the
/// [Pagination] is constructed, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The maximum number of rows to return.
    pub limit: u64,
    /// The number of matching rows to skip before the window starts.
    pub offset: u64,
}

/// One page of results plus the size of the full filtered set.
///
/// `count` is computed before the page window is applied, so it is the same
/// for every page of the same filtered query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    /// The rows inside the requested page window.
    pub items: Vec<T>,
    /// The number of rows matching the filter, ignoring the page window.
    pub count: u64,
}

#[cfg(test)]
mod pagination_tests {
    use crate::Error;

    use super::{PageWindow, Pagination};

    #[test]
    fn first_page_starts_at_offset_zero() {
        let window = Pagination::new(1, 10).unwrap().window();

        assert_eq!(
            window,
            PageWindow {
                limit: 10,
                offset: 0
            }
        );
    }

    #[test]
    fn second_page_of_three_starts_at_offset_three() {
        let window = Pagination::new(2, 3).unwrap().window();

        assert_eq!(window, PageWindow { limit: 3, offset: 3 });
    }

    #[test]
    fn zero_page_is_rejected() {
        assert_eq!(Pagination::new(0, 10), Err(Error::InvalidPageNumber));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(Pagination::new(1, 0), Err(Error::InvalidPageSize));
    }
}
