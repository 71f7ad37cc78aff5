//! Store2u CLI - Catalog browsing from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the full catalog, newest first
//! store2u browse
//!
//! # Search with filters, sorted by price
//! store2u browse --query shirt --status on-sale --sort price-asc
//!
//! # Scope to a category and page through results
//! store2u browse --category outerwear --page 2 --page-size 20
//!
//! # List taxonomies
//! store2u taxonomy categories
//! store2u taxonomy subcategories
//! ```
//!
//! # Environment Variables
//!
//! - `STORE2U_CATALOG_URL` - Base URL of the catalog API
//! - `STORE2U_API_TOKEN` - Optional bearer token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "store2u")]
#[command(author, version, about = "Store2u catalog browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with filters, sorting and paging
    Browse(commands::browse::BrowseArgs),
    /// List categories and subcategories
    Taxonomy {
        #[command(subcommand)]
        target: TaxonomyTarget,
    },
}

#[derive(Subcommand)]
enum TaxonomyTarget {
    /// List all categories
    Categories,
    /// List all subcategories
    Subcategories,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to warnings so listing output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "store2u=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse(args) => commands::browse::run(args).await?,
        Commands::Taxonomy { target } => match target {
            TaxonomyTarget::Categories => commands::taxonomy::categories().await?,
            TaxonomyTarget::Subcategories => commands::taxonomy::subcategories().await?,
        },
    }
    Ok(())
}
