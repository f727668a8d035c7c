//! # Search Module
//!
//! Header search box: substring match on product name and teaser.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Hits returned when the caller does not choose a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// A search suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[ts(as = "String")]
    pub price: Decimal,
}

impl From<&Product> for SearchHit {
    fn from(product: &Product) -> Self {
        SearchHit {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price,
        }
    }
}

/// Finds products whose name or short description contains the query.
///
/// ## Rules
/// - Query is trimmed; fewer than [`MIN_QUERY_CHARS`] characters → no hits
/// - Case-insensitive (Cyrillic included)
/// - Catalog order, at most `limit` hits
pub fn search_products(products: &[Product], query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| matches(product, &needle))
        .take(limit)
        .map(SearchHit::from)
        .collect()
}

fn matches(product: &Product, needle: &str) -> bool {
    if product.name.to_lowercase().contains(needle) {
        return true;
    }
    product
        .short_description
        .as_deref()
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(id: &str, name: &str, teaser: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            slug: id.to_string(),
            brand: String::new(),
            model: None,
            short_description: teaser.map(str::to_string),
            price: dec!(10),
            category: "1".to_string(),
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
            description: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Касов апарат Daisy", Some("Компактен касов апарат")),
            product("p2", "Фискален принтер FP-700", None),
            product("p3", "Етикетен принтер", Some("Печат на етикети с баркод")),
        ]
    }

    fn ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let products = catalog();
        assert!(search_products(&products, "", 8).is_empty());
        assert!(search_products(&products, " к ", 8).is_empty());
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let products = catalog();
        assert_eq!(ids(&search_products(&products, "ПРИНТЕР", 8)), vec!["p2", "p3"]);
        assert_eq!(ids(&search_products(&products, "daisy", 8)), vec!["p1"]);
    }

    #[test]
    fn test_matches_short_description() {
        let products = catalog();
        assert_eq!(ids(&search_products(&products, "баркод", 8)), vec!["p3"]);
    }

    #[test]
    fn test_limit() {
        let products = catalog();
        assert_eq!(ids(&search_products(&products, "р", 8)).len(), 0);
        assert_eq!(ids(&search_products(&products, "ер", 1)), vec!["p2"]);
    }

    #[test]
    fn test_two_cyrillic_chars_is_enough() {
        let products = catalog();
        assert_eq!(ids(&search_products(&products, "ка", 8)), vec!["p1", "p2"]);
    }
}
