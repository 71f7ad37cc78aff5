//! REST client for the catalog API.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use store2u_core::catalog::{CatalogItem, Taxonomy};

use super::{CatalogError, CatalogSource, FetchRequest};
use crate::config::StorefrontConfig;

/// Envelope used by every endpoint except the bare product index.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Vec<T>,
}

/// Client for the catalog API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    bearer_token: Option<String>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.catalog_url.clone(),
                bearer_token: config.bearer_token().map(str::to_string),
            }),
        }
    }

    /// Fetch and deserialize one endpoint.
    ///
    /// Reads the body as text before parsing so failures can be logged with
    /// a snippet of what the server actually sent.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|source| CatalogError::InvalidUrl {
                path: path.to_string(),
                source,
            })?;

        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                path,
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    path,
                    "Failed to parse catalog API response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Get the full product index.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.get_json("api/products").await
    }

    /// Search products server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let encoded = urlencoding::encode(query);
        let envelope: DataEnvelope<CatalogItem> = self
            .get_json(&format!("api/products/search/{encoded}"))
            .await?;
        Ok(envelope.data)
    }

    /// Get only products carrying a discount.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn get_discounted_products(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let envelope: DataEnvelope<CatalogItem> =
            self.get_json("api/products/discounted").await?;
        Ok(envelope.data)
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Taxonomy>, CatalogError> {
        let envelope: DataEnvelope<Taxonomy> = self.get_json("api/categories").await?;
        Ok(envelope.data)
    }

    /// Get all subcategories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn get_subcategories(&self) -> Result<Vec<Taxonomy>, CatalogError> {
        let envelope: DataEnvelope<Taxonomy> = self.get_json("api/subcategories").await?;
        Ok(envelope.data)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogItem>, CatalogError> {
        if let Some(query) = request.query.as_deref() {
            self.search_products(query).await
        } else if request.discounted_only {
            self.get_discounted_products().await
        } else {
            self.get_products().await
        }
    }
}
