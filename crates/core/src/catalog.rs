//! Catalog domain types.
//!
//! These types provide a clean, ergonomic API separate from the raw JSON
//! the catalog service returns. The one wire quirk handled here is the
//! `images` field, which arrives either as a JSON array of URLs or as a
//! JSON-encoded *string* containing such an array (legacy rows were stored
//! stringified). Deserialization normalizes both to `Vec<String>`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::effective_price;
use crate::types::{CategoryId, ProductId};

/// A sellable product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Nominal price, before any discount.
    pub price: Decimal,
    /// Discount percentage (0-100), absent when the item is not on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    /// Average review rating on a 0-5 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Creation timestamp, used for "newest" ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Category slug this item belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Subcategory slug this item belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Ordered image URLs.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

impl CatalogItem {
    /// Price after the discount percentage is applied.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.discount)
    }

    /// Whether the item currently carries a non-zero discount.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.discount.is_some_and(|d| d > Decimal::ZERO)
    }
}

/// A category or subcategory of catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Stable unique identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug used to scope listings.
    pub slug: String,
    /// Parent category, set only for subcategories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Accept `images` as either an array of strings or a JSON-encoded string.
///
/// A string value that fails to parse as a JSON array degrades to an empty
/// list rather than failing the whole item.
fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Raw::List(urls)) => Ok(urls),
        Some(Raw::Encoded(text)) => Ok(serde_json::from_str(&text).unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse_item(json: &str) -> CatalogItem {
        serde_json::from_str(json).expect("parse item")
    }

    #[test]
    fn test_images_as_array() {
        let item = parse_item(
            r#"{"id":1,"name":"Shirt","price":"25.00","images":["a.jpg","b.jpg"]}"#,
        );
        assert_eq!(item.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_images_as_encoded_string() {
        let item = parse_item(
            r#"{"id":1,"name":"Shirt","price":"25.00","images":"[\"a.jpg\",\"b.jpg\"]"}"#,
        );
        assert_eq!(item.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_images_malformed_string_degrades_to_empty() {
        let item = parse_item(r#"{"id":1,"name":"Shirt","price":"25.00","images":"not json"}"#);
        assert!(item.images.is_empty());
    }

    #[test]
    fn test_images_missing_or_null() {
        let item = parse_item(r#"{"id":1,"name":"Shirt","price":"25.00"}"#);
        assert!(item.images.is_empty());
        let item = parse_item(r#"{"id":1,"name":"Shirt","price":"25.00","images":null}"#);
        assert!(item.images.is_empty());
    }

    #[test]
    fn test_effective_price_and_on_sale() {
        let mut item = parse_item(r#"{"id":2,"name":"Hat","price":"50.00"}"#);
        assert!(!item.on_sale());
        assert_eq!(item.effective_price(), dec!(50.00));

        item.discount = Some(dec!(20));
        assert!(item.on_sale());
        assert_eq!(item.effective_price(), dec!(40.00));
    }

    #[test]
    fn test_taxonomy_parse() {
        let taxonomy: Taxonomy = serde_json::from_str(
            r#"{"id":3,"name":"Men","slug":"men","category_id":1}"#,
        )
        .expect("parse taxonomy");
        assert_eq!(taxonomy.slug, "men");
        assert_eq!(taxonomy.category_id, Some(CategoryId::new(1)));
    }
}
