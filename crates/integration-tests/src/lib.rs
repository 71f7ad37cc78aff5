//! Integration test support for Store2u.
//!
//! Provides [`FakeCatalog`], an in-process catalog API serving the same
//! wire shapes as production: a bare array for the product index and a
//! `{ "data": [...] }` envelope everywhere else. Tests point a real
//! `CatalogClient` at it over loopback HTTP.
//!
//! # Test Categories
//!
//! - `catalog_client` - Client wire behavior (envelopes, normalization, errors)
//! - `listing_flow` - End-to-end fetch / filter / sort / paginate flows

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Shared fixture state for the fake routes.
#[derive(Clone)]
struct FakeState {
    products: Vec<Value>,
}

/// An in-process catalog API bound to an ephemeral loopback port.
pub struct FakeCatalog {
    addr: SocketAddr,
}

impl FakeCatalog {
    /// Start a fake catalog serving the standard fixture products.
    pub async fn start() -> Self {
        Self::with_products(sample_products()).await
    }

    /// Start a fake catalog serving the given raw product JSON values.
    pub async fn with_products(products: Vec<Value>) -> Self {
        let state = FakeState { products };
        let router = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/search/{query}", get(search_products))
            .route("/api/products/discounted", get(discounted_products))
            .route("/api/categories", get(categories))
            .route("/api/subcategories", get(subcategories))
            .with_state(state);
        Self::serve(router).await
    }

    /// Start a fake catalog that answers 500 to everything.
    pub async fn failing() -> Self {
        let router = Router::new().fallback(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
        });
        Self::serve(router).await
    }

    /// Start a fake catalog that answers 200 with a non-JSON body.
    pub async fn malformed() -> Self {
        let router = Router::new().fallback(|| async { "{not valid json" });
        Self::serve(router).await
    }

    async fn serve(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake catalog listener");
        let addr = listener.local_addr().expect("fake catalog local addr");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("serve fake catalog");
        });
        Self { addr }
    }

    /// Base URL for a `StorefrontConfig` pointing at this fake.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

/// The standard product fixtures.
///
/// Covers both image encodings (array and JSON-encoded string), discounted
/// and undiscounted items, and a spread of ratings, prices and timestamps.
#[must_use]
pub fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Anorak Jacket",
            "price": "120.00",
            "rating": 4.8,
            "created_at": "2024-03-01T00:00:00Z",
            "category": "outerwear",
            "images": ["anorak-front.jpg", "anorak-back.jpg"]
        }),
        json!({
            "id": 2,
            "name": "Wool Beanie",
            "price": "25.00",
            "discount": "20",
            "created_at": "2024-04-01T00:00:00Z",
            "subcategory": "hats",
            // Legacy rows store images as a JSON-encoded string.
            "images": "[\"beanie.jpg\"]"
        }),
        json!({
            "id": 3,
            "name": "Linen Shirt",
            "price": "45.00",
            "rating": 4.2,
            "created_at": "2024-01-15T00:00:00Z",
            "category": "shirts",
            "images": []
        }),
        json!({
            "id": 4,
            "name": "Denim Jacket",
            "price": "80.00",
            "discount": "10",
            "rating": 4.6,
            "created_at": "2024-02-20T00:00:00Z",
            "category": "outerwear",
            "images": ["denim.jpg"]
        }),
    ]
}

// =============================================================================
// Route handlers
// =============================================================================

/// `GET /api/products` - bare array, no envelope.
async fn list_products(State(state): State<FakeState>) -> Json<Value> {
    Json(Value::Array(state.products))
}

/// `GET /api/products/search/{query}` - name substring match, enveloped.
async fn search_products(
    State(state): State<FakeState>,
    Path(query): Path<String>,
) -> Json<Value> {
    let needle = query.to_lowercase();
    let matches: Vec<Value> = state
        .products
        .into_iter()
        .filter(|p| {
            p.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect();
    Json(json!({ "data": matches }))
}

/// `GET /api/products/discounted` - items with a discount, enveloped.
async fn discounted_products(State(state): State<FakeState>) -> Json<Value> {
    let discounted: Vec<Value> = state
        .products
        .into_iter()
        .filter(|p| p.get("discount").is_some_and(|d| !d.is_null()))
        .collect();
    Json(json!({ "data": discounted }))
}

/// `GET /api/categories` - enveloped taxonomy list.
async fn categories() -> Json<Value> {
    Json(json!({
        "data": [
            { "id": 1, "name": "Outerwear", "slug": "outerwear" },
            { "id": 2, "name": "Shirts", "slug": "shirts" }
        ]
    }))
}

/// `GET /api/subcategories` - enveloped taxonomy list.
async fn subcategories() -> Json<Value> {
    Json(json!({
        "data": [
            { "id": 10, "name": "Hats", "slug": "hats", "category_id": 1 }
        ]
    }))
}
