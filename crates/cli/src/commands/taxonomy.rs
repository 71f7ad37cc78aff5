//! Taxonomy listing commands.

use thiserror::Error;

use store2u_core::catalog::Taxonomy;
use store2u_storefront::catalog::{CatalogClient, CatalogError};
use store2u_storefront::config::{ConfigError, StorefrontConfig};

/// Errors that can occur listing taxonomies.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// List all categories.
pub async fn categories() -> Result<(), TaxonomyError> {
    let client = client()?;
    print_taxonomies(&client.get_categories().await?);
    Ok(())
}

/// List all subcategories.
pub async fn subcategories() -> Result<(), TaxonomyError> {
    let client = client()?;
    print_taxonomies(&client.get_subcategories().await?);
    Ok(())
}

fn client() -> Result<CatalogClient, ConfigError> {
    let config = StorefrontConfig::from_env()?;
    Ok(CatalogClient::new(&config))
}

#[allow(clippy::print_stdout)] // listing output is the command's purpose
fn print_taxonomies(taxonomies: &[Taxonomy]) {
    for taxonomy in taxonomies {
        println!("{:>6}  {:<30} {}", taxonomy.id, taxonomy.name, taxonomy.slug);
    }
}
