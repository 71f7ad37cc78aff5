//! Store2u Core - Catalog domain types and the listing pipeline.
//!
//! This crate provides the pieces shared by every Store2u listing surface:
//! - `storefront` - Catalog API client and listing state machine
//! - `cli` - Command-line catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere, including synchronous view code.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and price arithmetic
//! - [`catalog`] - `CatalogItem` and `Taxonomy` domain types
//! - [`pipeline`] - The filter / sort / paginate listing pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod pipeline;
pub mod types;

pub use catalog::{CatalogItem, Taxonomy};
pub use pipeline::*;
pub use types::*;
