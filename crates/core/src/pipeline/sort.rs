//! Ordering Stage: a closed set of sort modes.
//!
//! Every mode is a stable sort returning a new collection; ties and items
//! missing the sort key keep their relative input order. Price modes compare
//! the *nominal* price, not the discounted one: listing pages rank by sticker
//! price, and the discounted figure stays a display concern on the item.

use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// How a filtered listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Most recently created first; undated items last.
    #[default]
    Newest,
    /// Cheapest first, by nominal price.
    PriceAsc,
    /// Most expensive first, by nominal price.
    PriceDesc,
    /// Alphabetical by display name, locale-aware.
    NameAsc,
}

/// Root-locale collator for name ordering.
///
/// Orders across case and accents ("Étui" lands next to "E") where plain
/// code-point comparison would push it past "Z".
static NAME_COLLATOR: LazyLock<Collator> = LazyLock::new(|| {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .expect("compiled collation data is available")
});

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            other => Err(format!("unknown sort mode: {other}")),
        }
    }
}

/// Sort the items by the given mode, returning a new ordered collection.
#[must_use]
pub fn sort(items: &[CatalogItem], mode: SortMode) -> Vec<CatalogItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| compare(a, b, mode));
    ordered
}

fn compare(a: &CatalogItem, b: &CatalogItem, mode: SortMode) -> Ordering {
    match mode {
        // Descending by timestamp; None sorts after Some so undated items
        // land at the end of a "newest first" listing.
        SortMode::Newest => match (a.created_at, b.created_at) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortMode::PriceAsc => a.price.cmp(&b.price),
        SortMode::PriceDesc => b.price.cmp(&a.price),
        SortMode::NameAsc => NAME_COLLATOR.compare(&a.name, &b.name),
    }
}
