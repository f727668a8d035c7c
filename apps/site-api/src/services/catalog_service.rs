//! Catalog read endpoints: menu, product listing and product detail.
//!
//! All three responses are cached per request and tagged with the website
//! page they feed, so `/api/revalidate` can drop them.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use gpi_core::catalog::{
    brands_in_listing, category_counts, featured_products, filter_products, product_count_label,
    sort_products, CategoryCounts, ListingQuery, SortOrder,
};
use gpi_core::category::{build_menu_tree, flatten_for_display, MenuNode};
use gpi_core::menu::{
    category_href, parent_group_by_slug, resolve_virtual_group, site_menu, MenuItem,
    VirtualParentGroup,
};
use gpi_core::rich_text::render_html;
use gpi_core::{Brand, Category, Product, FEATURED_PRODUCTS_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{currency_settings, to_cached_value, ProductSummary};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// =============================================================================
// Menu
// =============================================================================

/// One row of the indented category list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatMenuRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub level: u32,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    /// Static top navigation.
    pub navigation: Vec<MenuItem>,
    pub tree: Vec<MenuNode>,
    pub flat: Vec<FlatMenuRow>,
}

/// `GET /api/menu`
pub async fn menu(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    const KEY: &str = "/api/menu";
    if let Some(cached) = state.cache.get(KEY).await {
        return Ok(Json(cached));
    }

    let body = {
        let snapshot = state.store.read().await;
        let tree = build_menu_tree(&snapshot.categories);
        let flat = flatten_for_display(&tree)
            .into_iter()
            .map(|entry| FlatMenuRow {
                id: entry.node.id.clone(),
                name: entry.node.name.clone(),
                slug: entry.node.slug.clone(),
                level: entry.node.level,
                prefix: entry.prefix,
            })
            .collect();
        to_cached_value(&MenuResponse {
            navigation: site_menu(),
            tree,
            flat,
        })?
    };

    // The menu is part of every page's layout.
    state.cache.insert(KEY, "/", body.clone()).await;
    Ok(Json(body))
}

// =============================================================================
// Listing
// =============================================================================

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsParams {
    /// Category or virtual group slug.
    pub category: Option<String>,
    pub sort: Option<SortOrder>,
    /// Only featured products (home page strip).
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub products: Vec<ProductSummary>,
    pub count_label: String,
    pub counts: CategoryCounts,
    pub brands: Vec<Brand>,
    /// Set when the slug named a virtual parent group.
    pub group: Option<VirtualParentGroup>,
}

/// `GET /api/products?category=&sort=&featured=`
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProductsParams>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(params) = query?;
    let sort = params.sort.unwrap_or_default();

    // The featured strip ignores category and sort, so neither may vary its key.
    let (key, page_path) = if params.featured {
        ("/api/products?featured=true".to_string(), "/".to_string())
    } else {
        let key = format!(
            "/api/products?category={}&sort={:?}",
            params.category.as_deref().unwrap_or(""),
            sort
        );
        let page_path = match params.category.as_deref() {
            Some(slug) => category_href(slug),
            None => "/products".to_string(),
        };
        (key, page_path)
    };
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let body = {
        let snapshot = state.store.read().await;
        let settings = currency_settings(&state.config, &snapshot.site_settings)?;

        let (listed, group) = if params.featured {
            (
                featured_products(&snapshot.products, FEATURED_PRODUCTS_LIMIT),
                None,
            )
        } else {
            select_listing(
                &snapshot.categories,
                &snapshot.products,
                params.category.as_deref(),
                sort,
            )?
        };

        let products = listed
            .iter()
            .map(|product| ProductSummary::build(product, settings))
            .collect::<ApiResult<Vec<_>>>()?;

        to_cached_value(&ListingResponse {
            count_label: product_count_label(products.len()),
            products,
            counts: category_counts(&snapshot.products, &snapshot.categories),
            brands: brands_in_listing(&snapshot.brands, &listed)
                .into_iter()
                .cloned()
                .collect(),
            group,
        })?
    };

    debug!(key = %key, "Listing cached");
    state.cache.insert(key, &page_path, body.clone()).await;
    Ok(Json(body))
}

/// Picks the listed products for a slug: a virtual group gathers its member
/// categories, a real category filters by id, no slug lists everything.
fn select_listing<'a>(
    categories: &[Category],
    products: &'a [Product],
    slug: Option<&str>,
    sort: SortOrder,
) -> ApiResult<(Vec<&'a Product>, Option<VirtualParentGroup>)> {
    let Some(slug) = slug else {
        let query = ListingQuery {
            category: None,
            sort,
        };
        return Ok((filter_products(products, &query), None));
    };

    if let Some(group) = parent_group_by_slug(&site_menu(), slug) {
        let mut members = resolve_virtual_group(&group, categories, products);
        sort_products(&mut members, sort);
        return Ok((members, Some(group)));
    }

    let category = categories
        .iter()
        .find(|c| c.slug == slug)
        .ok_or_else(|| ApiError::not_found("Category", slug))?;
    let query = ListingQuery {
        category: Some(category.id.clone()),
        sort,
    };
    Ok((filter_products(products, &query), None))
}

// =============================================================================
// Product Detail
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub description_html: String,
    pub category_name: Option<String>,
    pub category_href: Option<String>,
}

/// `GET /api/products/{slug}`
pub async fn product_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let key = format!("/api/products/{}", slug);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let body = {
        let snapshot = state.store.read().await;
        let product = snapshot
            .products
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| ApiError::not_found("Product", &slug))?;
        let settings = currency_settings(&state.config, &snapshot.site_settings)?;
        let category = snapshot
            .categories
            .iter()
            .find(|c| c.id == product.category);

        to_cached_value(&ProductDetailResponse {
            summary: ProductSummary::build(product, settings)?,
            description_html: product
                .description
                .as_ref()
                .map(render_html)
                .unwrap_or_default(),
            category_name: category.map(|c| c.name.clone()),
            category_href: category.map(|c| category_href(&c.slug)),
        })?
    };

    state
        .cache
        .insert(key, &format!("/products/{}", slug), body.clone())
        .await;
    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support;

    fn params(
        category: Option<&str>,
        sort: Option<SortOrder>,
    ) -> Result<Query<ProductsParams>, QueryRejection> {
        Ok(Query(ProductsParams {
            category: category.map(str::to_string),
            sort,
            featured: false,
        }))
    }

    fn featured(category: &str) -> Result<Query<ProductsParams>, QueryRejection> {
        Ok(Query(ProductsParams {
            category: Some(category.to_string()),
            sort: None,
            featured: true,
        }))
    }

    fn slugs(body: &Value) -> Vec<String> {
        body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_menu_tree_and_flat_rows() {
        let state = test_support::state();
        let Json(body) = menu(State(state.clone())).await.unwrap();

        assert_eq!(body["tree"].as_array().unwrap().len(), 3);
        let flat = body["flat"].as_array().unwrap();
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[3]["slug"], "rachni-skeneri");
        assert_eq!(flat[3]["prefix"], "→ ");
        assert_eq!(body["navigation"][0]["label"], "НАЧАЛО");
        assert_eq!(state.cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_listing_default_newest_first() {
        let state = test_support::state();
        let Json(body) = list_products(State(state), params(None, None)).await.unwrap();

        assert_eq!(slugs(&body), vec!["scanner", "fp-700", "daisy"]);
        assert_eq!(body["countLabel"], "3 продукта");
        assert_eq!(body["counts"]["total"], 3);
        assert_eq!(body["products"][1]["price"]["combinedText"], "49,99 € (97,77 лв.)");
        assert_eq!(body["products"][0]["price"]["isQuoteOnly"], true);
        assert_eq!(body["brands"][0]["slug"], "datecs");
    }

    #[tokio::test]
    async fn test_listing_virtual_group() {
        let state = test_support::state();
        let Json(body) = list_products(
            State(state),
            params(Some("fiskalni-ustroystva"), Some(SortOrder::PriceAsc)),
        )
        .await
        .unwrap();

        assert_eq!(slugs(&body), vec!["fp-700", "daisy"]);
        assert_eq!(body["group"]["label"], "ФИСКАЛНИ УСТРОЙСТВА");
    }

    #[tokio::test]
    async fn test_listing_real_category_and_unknown_slug() {
        let state = test_support::state();
        let Json(body) = list_products(State(state.clone()), params(Some("kasovi-aparati"), None))
            .await
            .unwrap();
        assert_eq!(slugs(&body), vec!["daisy"]);
        assert_eq!(body["countLabel"], "1 продукт");
        assert!(body["group"].is_null());

        let err = list_products(State(state), params(Some("nope"), None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_listing_featured() {
        let state = test_support::state();
        let query = Ok(Query(ProductsParams {
            featured: true,
            ..ProductsParams::default()
        }));
        let Json(body) = list_products(State(state), query).await.unwrap();
        assert_eq!(slugs(&body), vec!["fp-700"]);
    }

    #[tokio::test]
    async fn test_featured_shares_one_cache_entry() {
        let state = test_support::state();
        for i in 0..50 {
            let Json(body) = list_products(State(state.clone()), featured(&format!("junk-{}", i)))
                .await
                .unwrap();
            assert_eq!(slugs(&body), vec!["fp-700"]);
        }
        assert_eq!(state.cache.len().await, 1);

        // Home page strip belongs to "/".
        assert_eq!(state.cache.evict("/products/category/junk-0").await, 0);
        assert_eq!(state.cache.evict("/").await, 1);
    }

    #[tokio::test]
    async fn test_bad_query_string_is_api_error() {
        let state = test_support::state();
        for uri in ["/api/products?sort=cheapest", "/api/products?featured=maybe"] {
            let query = Query::<ProductsParams>::try_from_uri(&uri.parse().unwrap());
            assert!(query.is_err());
            let err = list_products(State(state.clone()), query).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidRequest);
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        }
        assert!(state.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_product_detail() {
        let state = test_support::state();
        let Json(body) = product_detail(State(state.clone()), Path("fp-700".to_string()))
            .await
            .unwrap();

        assert_eq!(body["name"], "Фискален принтер FP-700");
        assert_eq!(body["descriptionHtml"], "<p><strong>Бърз печат</strong></p>");
        assert_eq!(body["categoryHref"], "/products/category/fiskalni-printeri");
        assert_eq!(body["price"]["secondaryText"], "97,77 лв.");

        let err = product_detail(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_responses_are_cached_until_evicted() {
        let state = test_support::state();
        let _ = product_detail(State(state.clone()), Path("daisy".to_string()))
            .await
            .unwrap();
        assert!(state.cache.get("/api/products/daisy").await.is_some());

        state.cache.evict("/products").await;
        assert!(state.cache.get("/api/products/daisy").await.is_none());
    }
}
