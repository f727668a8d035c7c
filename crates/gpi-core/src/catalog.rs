//! # Catalog Listing Module
//!
//! Filtering, sorting and counting behind the products page.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  all products ──► filter (category id?) ──► sort (SortOrder) ──► page  │
//! │                                                                         │
//! │  sidebar: "Всички продукти 42" + one counter per category              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Brand, Category, Product};

// =============================================================================
// Query
// =============================================================================

/// Sort orders offered on the products page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    Newest,
    /// Name A–Я.
    Name,
    /// Cheapest first; quote-only products last.
    PriceAsc,
    /// Most expensive first; quote-only products last.
    PriceDesc,
}

/// What the visitor picked on the products page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    /// Category id; `None` lists every product.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

// =============================================================================
// Filtering & Sorting
// =============================================================================

/// Applies the listing query. Stable: ties keep input order.
pub fn filter_products<'a>(products: &'a [Product], query: &ListingQuery) -> Vec<&'a Product> {
    let mut listed: Vec<&Product> = products
        .iter()
        .filter(|product| match query.category.as_deref() {
            Some(category) => product.category == category,
            None => true,
        })
        .collect();
    sort_products(&mut listed, query.sort);
    listed
}

/// Sorts in place with the given order (stable).
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Name => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::PriceAsc => products.sort_by(|a, b| compare_prices(a, b, false)),
        SortOrder::PriceDesc => products.sort_by(|a, b| compare_prices(a, b, true)),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_prices(a: &Product, b: &Product, descending: bool) -> Ordering {
    match (a.is_quote_only(), b.is_quote_only()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => b.price.cmp(&a.price),
        (false, false) => a.price.cmp(&b.price),
    }
}

// =============================================================================
// Counters
// =============================================================================

/// Product count for one category in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Sidebar counters: total plus one entry per category, in category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

/// Counts products per category id. Products whose category is not in the
/// list still count toward the total.
pub fn category_counts(products: &[Product], categories: &[Category]) -> CategoryCounts {
    let mut by_id: HashMap<&str, usize> = HashMap::new();
    for product in products {
        *by_id.entry(product.category.as_str()).or_default() += 1;
    }

    CategoryCounts {
        total: products.len(),
        categories: categories
            .iter()
            .map(|category| CategoryCount {
                id: category.id.clone(),
                name: category.name.clone(),
                slug: category.slug.clone(),
                count: by_id.get(category.id.as_str()).copied().unwrap_or(0),
            })
            .collect(),
    }
}

/// "1 продукт", "5 продукта".
pub fn product_count_label(count: usize) -> String {
    if count == 1 {
        format!("{} продукт", count)
    } else {
        format!("{} продукта", count)
    }
}

/// Featured products for the home page, input order, at most `limit`.
pub fn featured_products(products: &[Product], limit: usize) -> Vec<&Product> {
    products.iter().filter(|p| p.featured).take(limit).collect()
}

/// Brand records that at least one listed product carries, in brand order.
pub fn brands_in_listing<'a>(brands: &'a [Brand], listed: &[&Product]) -> Vec<&'a Brand> {
    let names: HashSet<String> = listed.iter().map(|p| p.brand.to_lowercase()).collect();
    brands
        .iter()
        .filter(|brand| names.contains(&brand.name.to_lowercase()))
        .collect()
}

// =============================================================================
// Slugs
// =============================================================================

/// Derives a URL slug from a name.
///
/// Lowercases, drops everything except word characters, whitespace and
/// dashes, turns whitespace runs into `-`, collapses repeated dashes and
/// trims dashes at both ends. Cyrillic letters are word characters and
/// survive unchanged.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
            last_dash = false;
        } else if (c.is_whitespace() || c == '-') && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_matches('-').to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
