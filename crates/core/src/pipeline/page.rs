//! Pagination Stage: fixed-size page slicing.
//!
//! Pages are zero-indexed. An out-of-range page yields an empty slice, not
//! an error, so the view layer never has a failure mode here.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// A zero-indexed page of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-indexed page number.
    pub number: usize,
    /// Items per page; always at least 1.
    pub size: usize,
}

impl Page {
    /// Default page size used by the admin tables.
    pub const DEFAULT_SIZE: usize = 10;

    /// Create a page. A zero size is bumped to 1.
    #[must_use]
    pub const fn new(number: usize, size: usize) -> Self {
        let size = if size == 0 { 1 } else { size };
        Self { number, size }
    }

    /// The first page with this page's size.
    #[must_use]
    pub const fn first(self) -> Self {
        Self {
            number: 0,
            size: self.size,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// Number of pages needed to show `total` items at `size` per page.
///
/// Zero items means zero pages.
#[must_use]
pub const fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Slice one page out of the ordered collection.
///
/// Out-of-range pages yield an empty slice.
#[must_use]
pub fn paginate(items: &[CatalogItem], page: Page) -> &[CatalogItem] {
    let start = page.number.saturating_mul(page.size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page.size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}
