//! # Menu Configuration Module
//!
//! The site's top-level navigation and its virtual parent groups.
//!
//! ## Virtual Parent Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu entry "ФИСКАЛНИ УСТРОЙСТВА" is NOT a category in the CMS.        │
//! │  It only exists here and gathers three real categories:                │
//! │                                                                         │
//! │      ФИСКАЛНИ УСТРОЙСТВА  (virtual, no id)                              │
//! │        ├── kasovi-aparati      ──► category 12                          │
//! │        ├── fiskalni-printeri   ──► category 14                          │
//! │        └── fuvas               ──► category 15                          │
//! │                                                                         │
//! │  Its product page lists every product of those categories.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Groups are read-only configuration; nothing here is ever written back to
//! the content store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Category, Product};

/// Path prefix of category listing pages.
pub const CATEGORY_PATH_PREFIX: &str = "/products/category/";

/// Listing page URL for a category slug.
pub fn category_href(slug: &str) -> String {
    format!("{}{}", CATEGORY_PATH_PREFIX, slug)
}

// =============================================================================
// Types
// =============================================================================

/// A link inside a drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubMenuItem {
    pub label: String,
    pub href: String,
}

/// A top-level navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SubMenuItem>,
    /// Category slugs aggregated under this entry; non-empty marks a
    /// virtual parent group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_slugs: Vec<String>,
}

impl MenuItem {
    fn link(label: &str, href: &str) -> Self {
        MenuItem {
            label: label.to_string(),
            href: href.to_string(),
            children: Vec::new(),
            children_slugs: Vec::new(),
        }
    }

    /// A drop-down entry whose children are category pages.
    fn category_group(label: &str, slug: &str, members: &[(&str, &str)]) -> Self {
        MenuItem {
            label: label.to_string(),
            href: category_href(slug),
            children: members
                .iter()
                .map(|(label, slug)| SubMenuItem {
                    label: label.to_string(),
                    href: category_href(slug),
                })
                .collect(),
            children_slugs: members.iter().map(|(_, slug)| slug.to_string()).collect(),
        }
    }

    /// The virtual group this entry defines, if any.
    pub fn virtual_group(&self) -> Option<VirtualParentGroup> {
        if self.children_slugs.is_empty() {
            return None;
        }
        Some(VirtualParentGroup {
            label: self.label.clone(),
            href: self.href.clone(),
            member_slugs: self.children_slugs.clone(),
        })
    }
}

/// A menu-only umbrella over several real categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VirtualParentGroup {
    pub label: String,
    pub href: String,
    pub member_slugs: Vec<String>,
}

// =============================================================================
// Site Menu
// =============================================================================

/// The site's main navigation, in display order.
pub fn site_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::link("НАЧАЛО", "/"),
        MenuItem::category_group(
            "ФИСКАЛНИ УСТРОЙСТВА",
            "fiskalni-ustroystva",
            &[
                ("Касови апарати", "kasovi-aparati"),
                ("Фискални принтери", "fiskalni-printeri"),
                ("ФУВАС", "fuvas"),
            ],
        ),
        MenuItem::link("СОФТУЕР", "/software"),
        MenuItem::category_group(
            "POS ОБОРУДВАНЕ",
            "pos-oborudvane",
            &[
                ("ЕЛЕКТРОННИ ВЕЗНИ", "elektronni-vezni"),
                ("ESC/POS принтери", "escpos-printeri"),
                ("LABEL принтери", "label-printeri"),
                ("Баркод скенери", "barkod-skeneri"),
                ("Периферни устройства", "periferni-ustroystva"),
            ],
        ),
        MenuItem::link("ПОС ТЕРМИНАЛИ", &category_href("pos-terminali")),
        MenuItem::link("УСЛУГИ", "/services"),
        MenuItem::link("КОНСУМАТИВИ", &category_href("consumativi")),
        MenuItem::link("ЗА НАС", "/about"),
        MenuItem::link("КОНТАКТИ", "/contact"),
    ]
}

/// Finds the virtual group whose listing page is `/products/category/{slug}`.
pub fn parent_group_by_slug(menu: &[MenuItem], slug: &str) -> Option<VirtualParentGroup> {
    let href = category_href(slug);
    menu.iter()
        .find(|item| item.href == href && !item.children_slugs.is_empty())
        .and_then(MenuItem::virtual_group)
}

// =============================================================================
// Group Resolution
// =============================================================================

/// Products belonging to any member category of the group.
///
/// Member slugs with no matching category (stale configuration) are skipped.
/// Result keeps the input product order.
pub fn resolve_virtual_group<'a>(
    group: &VirtualParentGroup,
    categories: &[Category],
    products: &'a [Product],
) -> Vec<&'a Product> {
    let member_slugs: HashSet<&str> = group.member_slugs.iter().map(String::as_str).collect();
    let member_ids: HashSet<&str> = categories
        .iter()
        .filter(|category| member_slugs.contains(category.slug.as_str()))
        .map(|category| category.id.as_str())
        .collect();

    products
        .iter()
        .filter(|product| member_ids.contains(product.category.as_str()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
            brand: "Datecs".to_string(),
            model: None,
            short_description: None,
            price: Decimal::ONE,
            category: category.to_string(),
            in_stock: true,
            featured: false,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            description: None,
        }
    }

    fn fixture() -> (Vec<Category>, Vec<Product>) {
        let categories = vec![
            Category::new("1", "A", "a"),
            Category::new("2", "B", "b"),
            Category::new("3", "C", "c"),
        ];
        let products = vec![product("p1", "1"), product("p2", "2"), product("p3", "3")];
        (categories, products)
    }

    fn group(slugs: &[&str]) -> VirtualParentGroup {
        VirtualParentGroup {
            label: "Group".to_string(),
            href: category_href("group"),
            member_slugs: slugs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_resolve_preserves_order() {
        let (categories, products) = fixture();
        let resolved = resolve_virtual_group(&group(&["c", "a"]), &categories, &products);
        assert_eq!(ids(&resolved), vec!["p1", "p3"]);
    }

    #[test]
    fn test_resolve_skips_stale_slug() {
        let (categories, products) = fixture();
        let resolved = resolve_virtual_group(&group(&["a", "zzz"]), &categories, &products);
        assert_eq!(ids(&resolved), vec!["p1"]);
    }

    #[test]
    fn test_resolve_empty_inputs() {
        let (categories, products) = fixture();
        assert!(resolve_virtual_group(&group(&[]), &categories, &products).is_empty());
        assert!(resolve_virtual_group(&group(&["a"]), &[], &products).is_empty());
        assert!(resolve_virtual_group(&group(&["a"]), &categories, &[]).is_empty());
    }

    #[test]
    fn test_site_menu_groups() {
        let menu = site_menu();
        assert_eq!(menu.len(), 9);
        assert_eq!(menu[0].href, "/");

        let groups: Vec<VirtualParentGroup> = menu.iter().filter_map(MenuItem::virtual_group).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].member_slugs, vec!["kasovi-aparati", "fiskalni-printeri", "fuvas"]);
        assert_eq!(menu[1].children[2].href, "/products/category/fuvas");
    }

    #[test]
    fn test_parent_group_by_slug() {
        let menu = site_menu();
        let group = parent_group_by_slug(&menu, "pos-oborudvane").unwrap();
        assert_eq!(group.label, "POS ОБОРУДВАНЕ");
        assert_eq!(group.member_slugs.len(), 5);

        // A plain category link is not a group.
        assert!(parent_group_by_slug(&menu, "pos-terminali").is_none());
        assert!(parent_group_by_slug(&menu, "unknown").is_none());
    }

    #[test]
    fn test_menu_item_serialization_skips_empty_lists() {
        let json = serde_json::to_value(&site_menu()[0]).unwrap();
        assert_eq!(json, serde_json::json!({ "label": "НАЧАЛО", "href": "/" }));
    }
}
