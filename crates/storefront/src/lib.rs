//! Store2u Storefront library.
//!
//! The pieces every listing surface shares: the catalog API client, the
//! environment configuration, and the listing state machine that drives the
//! filter / sort / paginate pipeline from `store2u-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod listing;

pub use catalog::{CatalogClient, CatalogError, CatalogSource, FetchRequest};
pub use config::{ConfigError, StorefrontConfig};
pub use listing::{Listing, ListingPhase, ListingView};
