//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain REST JSON over `reqwest` - the catalog service is the source of
//!   truth, listings fetch the full matching collection in one request
//! - No client-side cache and no retry: a failed fetch degrades to an empty
//!   listing at the state-machine boundary, never into the view layer
//! - Two response shapes on the wire: the product index returns a bare
//!   array, everything else wraps the payload as `{ "data": [...] }`
//!
//! # Example
//!
//! ```rust,ignore
//! use store2u_storefront::catalog::{CatalogClient, FetchRequest};
//!
//! let client = CatalogClient::new(&config);
//!
//! // Full product index
//! let products = client.get_products().await?;
//!
//! // Search, via the `{ data: [...] }` envelope
//! let results = client.search_products("shirt").await?;
//! ```

mod client;

pub use client::CatalogClient;

use store2u_core::catalog::CatalogItem;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, DNS, reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Leading snippet of the response body.
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint path could not be joined onto the configured base URL.
    #[error("invalid request URL for path {path}: {source}")]
    InvalidUrl {
        /// Relative endpoint path that failed to join.
        path: String,
        /// Underlying URL parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// What a listing surface asks the fetcher for.
///
/// Taxonomy scoping is deliberately absent here: the catalog API has no
/// per-category product endpoint, so category and subcategory pages fetch
/// the full set and scope it in the Predicate Stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Free-text search term; routes to the search endpoint when set.
    pub query: Option<String>,
    /// Fetch only discounted products. Ignored when `query` is set.
    pub discounted_only: bool,
}

impl FetchRequest {
    /// Request the full product index.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            query: None,
            discounted_only: false,
        }
    }

    /// Request a server-side search.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            discounted_only: false,
        }
    }

    /// Request only discounted products.
    #[must_use]
    pub const fn discounted() -> Self {
        Self {
            query: None,
            discounted_only: true,
        }
    }
}

/// Source of catalog collections.
///
/// Abstracts [`CatalogClient`] so the listing state machine can be driven
/// by an in-memory fake in tests.
pub trait CatalogSource {
    /// Fetch the full collection matching the request.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send;
}
