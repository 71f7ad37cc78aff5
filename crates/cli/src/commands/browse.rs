//! Catalog browse command.
//!
//! Fetches the matching collection from the catalog API, runs the
//! filter / sort / paginate pipeline and prints one line per item.

use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;

use store2u_core::pipeline::{
    FilterCriteria, Page, PriceBounds, PriceBoundsError, SortMode, StatusFilter, TaxonomyScope,
};
use store2u_storefront::catalog::{CatalogClient, FetchRequest};
use store2u_storefront::config::{ConfigError, StorefrontConfig};
use store2u_storefront::listing::{Listing, ListingPhase};

/// Errors that can occur while browsing.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Price bounds were invalid.
    #[error(transparent)]
    PriceBounds(#[from] PriceBoundsError),

    /// Both --category and --subcategory were given.
    #[error("--category and --subcategory are mutually exclusive")]
    ConflictingScope,
}

/// Arguments for `store2u browse`.
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Free-text search (server-side)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only fetch discounted products
    #[arg(long)]
    pub discounted: bool,

    /// Status filter: all, top-rated, on-sale
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Minimum nominal price
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Maximum nominal price
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Restrict to a category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Restrict to a subcategory slug
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Sort mode: newest, price-asc, price-desc, name-asc
    #[arg(short, long, default_value = "newest")]
    pub sort: SortMode,

    /// Zero-indexed page number
    #[arg(short, long, default_value_t = 0)]
    pub page: usize,

    /// Items per page
    #[arg(long, default_value_t = Page::DEFAULT_SIZE)]
    pub page_size: usize,
}

impl BrowseArgs {
    fn criteria(&self) -> Result<FilterCriteria, BrowseError> {
        let price = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some(PriceBounds::new(
                min.unwrap_or(Decimal::ZERO),
                max.unwrap_or(Decimal::MAX),
            )?),
        };

        let scope = match (&self.category, &self.subcategory) {
            (Some(_), Some(_)) => return Err(BrowseError::ConflictingScope),
            (Some(slug), None) => Some(TaxonomyScope::Category(slug.clone())),
            (None, Some(slug)) => Some(TaxonomyScope::Subcategory(slug.clone())),
            (None, None) => None,
        };

        Ok(FilterCriteria {
            // The server already narrowed by query; re-applying it locally
            // keeps the view consistent if the API ever over-returns.
            query: self.query.clone(),
            status: self.status,
            price,
            scope,
        })
    }

    fn request(&self) -> FetchRequest {
        match &self.query {
            Some(query) => FetchRequest::search(query.clone()),
            None if self.discounted => FetchRequest::discounted(),
            None => FetchRequest::all(),
        }
    }
}

/// Run the browse command.
#[allow(clippy::print_stdout)] // listing output is the command's purpose
pub async fn run(args: BrowseArgs) -> Result<(), BrowseError> {
    let config = StorefrontConfig::from_env()?;
    let client = CatalogClient::new(&config);

    let mut listing = Listing::new(client);
    listing.set_criteria(args.criteria()?);
    listing.set_sort(args.sort);
    listing.set_page_size(args.page_size);
    listing.refresh(args.request()).await;
    listing.set_page(args.page);

    let view = listing.view();
    if view.phase == ListingPhase::FetchFailed {
        tracing::warn!("Catalog unavailable; nothing to show");
    }

    for item in &view.items {
        let price = item.effective_price();
        let sale = if item.on_sale() { " (on sale)" } else { "" };
        println!("{:>6}  {:<40} {:>10}{}", item.id, item.name, price, sale);
    }
    println!(
        "page {} of {} - {} item(s) total",
        view.page.number,
        view.page_count,
        view.total_items
    );

    Ok(())
}
