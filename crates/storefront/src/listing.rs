//! Listing state machine.
//!
//! One `Listing` owns the catalog collection for a page and the ephemeral
//! view state (criteria, sort mode, page). The view is recomputed from the
//! full in-memory set on every change; nothing is cached between fetches.
//!
//! # State machine
//!
//! ```text
//! Idle -> Fetching -> { Loaded, FetchFailed }
//! Loaded -> (set_criteria / set_sort / set_page, synchronous) -> Loaded
//! ```
//!
//! `FetchFailed` is terminal until the next explicit fetch. A failed fetch
//! leaves the listing with an empty collection: the view shows a "no
//! results" state rather than an error surface.
//!
//! # Stale responses
//!
//! Fetches are tagged with a monotonically increasing sequence number. A
//! completion is applied only when it carries the most recently issued
//! sequence; anything older is discarded silently, so a slow superseded
//! request can never overwrite newer state. `refresh()` composes
//! [`Listing::begin_fetch`] and [`Listing::complete_fetch`]; the two halves
//! stay public so drivers that overlap requests can use the guard directly.

use tracing::{debug, warn};

use store2u_core::catalog::CatalogItem;
use store2u_core::pipeline::{
    FilterCriteria, Page, SortMode, filter::filter, page_count, paginate, sort::sort,
};

use crate::catalog::{CatalogError, CatalogSource, FetchRequest};

/// Where a listing is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The collection is loaded and the view is current.
    Loaded,
    /// The last fetch failed; the collection is empty.
    FetchFailed,
}

/// Ticket identifying one issued fetch.
///
/// Returned by [`Listing::begin_fetch`] and consumed by
/// [`Listing::complete_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    /// Items on the current page, filtered and ordered.
    pub items: Vec<CatalogItem>,
    /// Total items after filtering, across all pages.
    pub total_items: usize,
    /// Number of pages at the current page size.
    pub page_count: usize,
    /// Current page.
    pub page: Page,
    /// Lifecycle phase.
    pub phase: ListingPhase,
}

/// A listing page's state: the fetched collection plus view parameters.
#[derive(Debug)]
pub struct Listing<S> {
    source: S,
    phase: ListingPhase,
    items: Vec<CatalogItem>,
    criteria: FilterCriteria,
    sort_mode: SortMode,
    page: Page,
    /// Sequence number of the most recently issued fetch.
    latest_seq: u64,
}

impl<S> Listing<S> {
    /// Create an idle listing backed by the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: ListingPhase::Idle,
            items: Vec::new(),
            criteria: FilterCriteria::default(),
            sort_mode: SortMode::default(),
            page: Page::default(),
            latest_seq: 0,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> ListingPhase {
        self.phase
    }

    /// Issue a fetch: bump the sequence and enter `Fetching`.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.phase = ListingPhase::Fetching;
        FetchTicket {
            seq: self.latest_seq,
        }
    }

    /// Apply a fetch result, unless a newer fetch has been issued since.
    ///
    /// Stale completions are discarded without touching any state. A fresh
    /// failure clears the collection and moves to `FetchFailed`; the error
    /// is logged here and goes no further.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<CatalogItem>, CatalogError>,
    ) {
        if ticket.seq != self.latest_seq {
            debug!(
                stale_seq = ticket.seq,
                latest_seq = self.latest_seq,
                "Discarding stale fetch response"
            );
            return;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.phase = ListingPhase::Loaded;
            }
            Err(error) => {
                warn!(%error, "Catalog fetch failed; showing empty listing");
                self.items = Vec::new();
                self.phase = ListingPhase::FetchFailed;
            }
        }
        // New upstream collection: never leave the user on a stale page.
        self.page = self.page.first();
    }

    /// Replace the filter criteria and reset to the first page.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            self.criteria = criteria;
            self.page = self.page.first();
        }
    }

    /// Replace the sort mode and reset to the first page.
    pub fn set_sort(&mut self, mode: SortMode) {
        if self.sort_mode != mode {
            self.sort_mode = mode;
            self.page = self.page.first();
        }
    }

    /// Move to a page, keeping the current page size.
    ///
    /// Out-of-range pages are allowed; they render an empty slice.
    pub fn set_page(&mut self, number: usize) {
        self.page = Page::new(number, self.page.size);
    }

    /// Change the page size and reset to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        if self.page.size != size {
            self.page = Page::new(0, size);
        }
    }

    /// Run the pipeline over the owned collection and build the view.
    #[must_use]
    pub fn view(&self) -> ListingView {
        let filtered = filter(&self.items, &self.criteria);
        let ordered = sort(&filtered, self.sort_mode);
        let total_items = ordered.len();
        ListingView {
            items: paginate(&ordered, self.page).to_vec(),
            total_items,
            page_count: page_count(total_items, self.page.size),
            page: self.page,
            phase: self.phase,
        }
    }
}

impl<S: CatalogSource> Listing<S> {
    /// Fetch the collection for `request` and apply it.
    ///
    /// Equivalent to `begin_fetch` + `complete_fetch` around one await of
    /// the source. Failures degrade to an empty `FetchFailed` listing, so
    /// this never returns an error.
    pub async fn refresh(&mut self, request: FetchRequest) {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&request).await;
        self.complete_fetch(ticket, result);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use store2u_core::pipeline::{StatusFilter, TaxonomyScope};
    use store2u_core::types::ProductId;

    use super::*;

    /// In-memory source returning a canned result per call.
    struct FakeSource {
        result: Result<Vec<CatalogItem>, ()>,
    }

    impl CatalogSource for FakeSource {
        async fn fetch(&self, _request: &FetchRequest) -> Result<Vec<CatalogItem>, CatalogError> {
            match &self.result {
                Ok(items) => Ok(items.clone()),
                Err(()) => Err(CatalogError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    fn item(id: i64, name: &str, price: i64) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(price, 0),
            discount: None,
            rating: None,
            created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).single(),
            category: None,
            subcategory: None,
            images: Vec::new(),
        }
    }

    fn loaded_listing(items: Vec<CatalogItem>) -> Listing<FakeSource> {
        let mut listing = Listing::new(FakeSource { result: Ok(items) });
        let ticket = listing.begin_fetch();
        let fetched = futures_ready(listing.source.fetch(&FetchRequest::all()));
        listing.complete_fetch(ticket, fetched);
        listing
    }

    /// Drive a future we know is immediately ready.
    fn futures_ready<T>(fut: impl Future<Output = T>) -> T {
        use std::task::{Context, Poll, Waker};
        let mut fut = Box::pin(fut);
        let waker = Waker::noop();
        let mut cx = Context::from_waker(waker);
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(value) => value,
            Poll::Pending => unreachable!("fake source futures are always ready"),
        }
    }

    #[test]
    fn test_idle_until_first_fetch() {
        let listing = Listing::new(FakeSource { result: Ok(vec![]) });
        assert_eq!(listing.phase(), ListingPhase::Idle);
        let view = listing.view();
        assert!(view.items.is_empty());
        assert_eq!(view.page_count, 0);
    }

    #[tokio::test]
    async fn test_refresh_loads_items() {
        let mut listing = Listing::new(FakeSource {
            result: Ok(vec![item(1, "A", 100), item(2, "B", 50)]),
        });
        listing.refresh(FetchRequest::all()).await;
        assert_eq!(listing.phase(), ListingPhase::Loaded);
        assert_eq!(listing.view().total_items, 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty() {
        let mut listing = Listing::new(FakeSource { result: Err(()) });
        listing.refresh(FetchRequest::all()).await;
        assert_eq!(listing.phase(), ListingPhase::FetchFailed);
        let view = listing.view();
        assert!(view.items.is_empty());
        assert_eq!(view.page_count, 0);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        // Two fetches issued; the older one resolves last. The final state
        // must reflect the last *issued* request, not the last resolved one.
        let mut listing = Listing::new(FakeSource { result: Ok(vec![]) });
        let first = listing.begin_fetch();
        let second = listing.begin_fetch();

        listing.complete_fetch(second, Ok(vec![item(2, "Fresh", 10)]));
        listing.complete_fetch(first, Ok(vec![item(1, "Stale", 10)]));

        assert_eq!(listing.phase(), ListingPhase::Loaded);
        let view = listing.view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(
            view.items.first().map(|i| i.name.as_str()),
            Some("Fresh")
        );
    }

    #[test]
    fn test_stale_failure_does_not_clobber_fresh_data() {
        let mut listing = Listing::new(FakeSource { result: Ok(vec![]) });
        let first = listing.begin_fetch();
        let second = listing.begin_fetch();

        listing.complete_fetch(second, Ok(vec![item(2, "Fresh", 10)]));
        listing.complete_fetch(
            first,
            Err(CatalogError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "late failure".to_string(),
            }),
        );

        assert_eq!(listing.phase(), ListingPhase::Loaded);
        assert_eq!(listing.view().total_items, 1);
    }

    #[test]
    fn test_criteria_change_resets_page() {
        let mut listing = loaded_listing((0..30).map(|i| item(i, "X", i)).collect());
        listing.set_page(2);
        assert_eq!(listing.view().page.number, 2);

        listing.set_criteria(FilterCriteria {
            status: StatusFilter::OnSale,
            ..FilterCriteria::default()
        });
        assert_eq!(listing.view().page.number, 0);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut listing = loaded_listing((0..30).map(|i| item(i, "X", i)).collect());
        listing.set_page(2);
        assert_eq!(listing.view().page.number, 2);

        listing.set_sort(SortMode::PriceAsc);
        assert_eq!(listing.view().page.number, 0);

        // Re-selecting the current mode is not an upstream change.
        listing.set_page(1);
        listing.set_sort(SortMode::PriceAsc);
        assert_eq!(listing.view().page.number, 1);
    }

    #[test]
    fn test_same_criteria_does_not_reset_page() {
        let mut listing = loaded_listing((0..30).map(|i| item(i, "X", i)).collect());
        listing.set_page(2);
        listing.set_criteria(FilterCriteria::default());
        assert_eq!(listing.view().page.number, 2);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut listing = loaded_listing((0..30).map(|i| item(i, "X", i)).collect());
        listing.set_page(2);
        listing.set_page_size(5);
        let view = listing.view();
        assert_eq!(view.page.number, 0);
        assert_eq!(view.page.size, 5);
        assert_eq!(view.page_count, 6);
    }

    #[test]
    fn test_out_of_range_page_renders_empty() {
        let mut listing = loaded_listing((0..5).map(|i| item(i, "X", i)).collect());
        listing.set_page(2);
        let view = listing.view();
        assert!(view.items.is_empty());
        assert_eq!(view.total_items, 5);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_view_runs_full_pipeline() {
        let mut a = item(1, "Anorak", 100);
        a.category = Some("outerwear".to_string());
        let mut b = item(2, "Blazer", 80);
        b.category = Some("outerwear".to_string());
        b.discount = Some(dec!(10));
        let c = item(3, "Cap", 20);

        let mut listing = loaded_listing(vec![a, b, c]);
        listing.set_criteria(FilterCriteria {
            scope: Some(TaxonomyScope::Category("outerwear".to_string())),
            ..FilterCriteria::default()
        });
        listing.set_sort(SortMode::PriceAsc);

        let view = listing.view();
        let names: Vec<_> = view.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Blazer", "Anorak"]);
        assert_eq!(view.total_items, 2);
        assert_eq!(view.page_count, 1);
    }
}
