//! The listing pipeline: filter, then sort, then paginate.
//!
//! Every Store2u listing surface (all products, category, subcategory,
//! discounted, admin tables) runs the same three stages over an in-memory
//! collection fetched wholesale from the catalog API:
//!
//! ```text
//! fetch -> filter (conjunction of predicates) -> sort -> paginate -> view
//! ```
//!
//! All stages are pure: they take slices, return new collections, and
//! recompute from the full set on every change. None of them performs I/O.

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{FilterCriteria, PriceBounds, PriceBoundsError, StatusFilter, TaxonomyScope};
pub use page::{Page, page_count, paginate};
pub use sort::SortMode;

use crate::catalog::CatalogItem;

/// Run the full pipeline and return the items for one page.
///
/// Convenience composition of [`filter::filter`], [`sort::sort`] and
/// [`page::paginate`] for callers that do not need the intermediate
/// collections.
#[must_use]
pub fn run(
    items: &[CatalogItem],
    criteria: &FilterCriteria,
    mode: SortMode,
    page: Page,
) -> Vec<CatalogItem> {
    let ordered = sort::sort(&filter::filter(items, criteria), mode);
    paginate(&ordered, page).to_vec()
}
