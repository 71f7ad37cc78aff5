//! Predicate Stage: a conjunction of independent filter predicates.
//!
//! Four predicates compose with logical AND: free-text query, status
//! classification, price bounds, and taxonomy scope. Each unset predicate
//! matches everything, so `FilterCriteria::default()` is a no-op filter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogItem;

/// Minimum rating for an item to classify as top-rated.
const TOP_RATED_THRESHOLD: f64 = 4.5;

/// Filter criteria applied by the Predicate Stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query, matched case-insensitively against every field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Status classification.
    #[serde(default)]
    pub status: StatusFilter,
    /// Inclusive nominal-price bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBounds>,
    /// Category or subcategory scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<TaxonomyScope>,
}

/// Status classification of a catalog item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// Match every item.
    #[default]
    All,
    /// Items with a rating of at least 4.5.
    TopRated,
    /// Items carrying a non-zero discount.
    OnSale,
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "top-rated" => Ok(Self::TopRated),
            "on-sale" => Ok(Self::OnSale),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Inclusive price bounds with `min <= max` enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    min: Decimal,
    max: Decimal,
}

/// Error constructing [`PriceBounds`].
#[derive(Debug, Error)]
pub enum PriceBoundsError {
    /// The lower bound exceeds the upper bound.
    #[error("invalid price bounds: min {min} exceeds max {max}")]
    Inverted {
        /// Requested lower bound.
        min: Decimal,
        /// Requested upper bound.
        max: Decimal,
    },
}

impl PriceBounds {
    /// Create price bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PriceBoundsError::Inverted`] when `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, PriceBoundsError> {
        if min > max {
            return Err(PriceBoundsError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// Whether a nominal price falls inside the bounds.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Category or subcategory scope for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "slug")]
pub enum TaxonomyScope {
    /// Restrict to items whose category slug matches.
    Category(String),
    /// Restrict to items whose subcategory slug matches.
    Subcategory(String),
}

impl TaxonomyScope {
    fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Self::Category(slug) => item.category.as_deref() == Some(slug.as_str()),
            Self::Subcategory(slug) => item.subcategory.as_deref() == Some(slug.as_str()),
        }
    }
}

/// Apply the filter criteria, returning the matching items in input order.
///
/// The predicates compose as a conjunction; an empty input yields an empty
/// output. Filtering is idempotent: re-applying the same criteria to its
/// own output is a no-op.
#[must_use]
pub fn filter(items: &[CatalogItem], criteria: &FilterCriteria) -> Vec<CatalogItem> {
    items
        .iter()
        .filter(|item| matches(item, criteria))
        .cloned()
        .collect()
}

/// Whether a single item satisfies every predicate in the criteria.
#[must_use]
pub fn matches(item: &CatalogItem, criteria: &FilterCriteria) -> bool {
    if let Some(query) = criteria.query.as_deref()
        && !matches_any_field(item, query)
    {
        return false;
    }

    let status_ok = match criteria.status {
        StatusFilter::All => true,
        StatusFilter::TopRated => item.rating.is_some_and(|r| r >= TOP_RATED_THRESHOLD),
        StatusFilter::OnSale => item.on_sale(),
    };
    if !status_ok {
        return false;
    }

    if let Some(bounds) = &criteria.price
        && !bounds.contains(item.price)
    {
        return false;
    }

    criteria.scope.as_ref().is_none_or(|scope| scope.matches(item))
}

/// Case-insensitive substring match against the stringified form of every
/// field on the item.
///
/// This is deliberately permissive - it matches on ids, timestamps and image
/// URLs as well as the name - because that is the search behavior the
/// listing pages have always shipped with. Kept behind this named function
/// so it can be swapped for field-scoped search without touching callers.
#[must_use]
pub fn matches_any_field(item: &CatalogItem, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let Ok(value) = serde_json::to_value(item) else {
        return false;
    };
    any_scalar_contains(&value, &needle)
}

fn any_scalar_contains(value: &serde_json::Value, needle: &str) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => b.to_string().contains(needle),
        serde_json::Value::Number(n) => n.to_string().contains(needle),
        serde_json::Value::String(s) => s.to_lowercase().contains(needle),
        serde_json::Value::Array(values) => {
            values.iter().any(|v| any_scalar_contains(v, needle))
        }
        serde_json::Value::Object(map) => {
            map.values().any(|v| any_scalar_contains(v, needle))
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::pipeline::testutil::item;

    fn catalog() -> Vec<CatalogItem> {
        let mut a = item(1, "Anorak", 100);
        a.rating = Some(4.8);
        a.category = Some("outerwear".to_string());

        let mut b = item(2, "Beanie", 50);
        b.discount = Some(dec!(20));
        b.subcategory = Some("hats".to_string());

        let c = item(3, "Cardigan", 75);
        vec![a, b, c]
    }

    #[test]
    fn test_default_criteria_match_everything() {
        let items = catalog();
        assert_eq!(filter(&items, &FilterCriteria::default()), items);
    }

    #[test]
    fn test_on_sale_returns_only_discounted() {
        let items = catalog();
        let criteria = FilterCriteria {
            status: StatusFilter::OnSale,
            ..FilterCriteria::default()
        };
        let result = filter(&items, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().map(|i| i.name.as_str()), Some("Beanie"));
    }

    #[test]
    fn test_top_rated_requires_threshold() {
        let items = catalog();
        let criteria = FilterCriteria {
            status: StatusFilter::TopRated,
            ..FilterCriteria::default()
        };
        let result = filter(&items, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().map(|i| i.name.as_str()), Some("Anorak"));
    }

    #[test]
    fn test_price_bounds() {
        let items = catalog();
        let criteria = FilterCriteria {
            price: Some(PriceBounds::new(dec!(60), dec!(100)).expect("bounds")),
            ..FilterCriteria::default()
        };
        let names: Vec<_> = filter(&items, &criteria)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Anorak", "Cardigan"]);
    }

    #[test]
    fn test_price_bounds_inverted_rejected() {
        assert!(PriceBounds::new(dec!(10), dec!(5)).is_err());
    }

    #[test]
    fn test_taxonomy_scope() {
        let items = catalog();
        let category = FilterCriteria {
            scope: Some(TaxonomyScope::Category("outerwear".to_string())),
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&items, &category).len(), 1);

        let subcategory = FilterCriteria {
            scope: Some(TaxonomyScope::Subcategory("hats".to_string())),
            ..FilterCriteria::default()
        };
        let result = filter(&items, &subcategory);
        assert_eq!(result.first().map(|i| i.name.as_str()), Some("Beanie"));
    }

    #[test]
    fn test_query_matches_name_case_insensitively() {
        let items = catalog();
        let criteria = FilterCriteria {
            query: Some("bEaN".to_string()),
            ..FilterCriteria::default()
        };
        let result = filter(&items, &criteria);
        assert_eq!(result.first().map(|i| i.name.as_str()), Some("Beanie"));
    }

    #[test]
    fn test_query_matches_non_name_fields() {
        // The permissive search matches stringified ids and slugs too.
        let items = catalog();
        let criteria = FilterCriteria {
            query: Some("outerwear".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&items, &criteria).len(), 1);
    }

    #[test]
    fn test_query_with_no_match_yields_empty() {
        let items = catalog();
        let criteria = FilterCriteria {
            query: Some("xyz".to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter(&items, &criteria).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let items = catalog();
        let criteria = FilterCriteria {
            query: Some("a".to_string()),
            status: StatusFilter::All,
            price: Some(PriceBounds::new(dec!(0), dec!(200)).expect("bounds")),
            scope: None,
        };
        let once = filter(&items, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(filter(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("on-sale".parse::<StatusFilter>(), Ok(StatusFilter::OnSale));
        assert_eq!(
            "top-rated".parse::<StatusFilter>(),
            Ok(StatusFilter::TopRated)
        );
        assert!("best".parse::<StatusFilter>().is_err());
    }
}
