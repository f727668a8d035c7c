//! # Category Hierarchy Module
//!
//! Projects the flat, parent-pointer category list into menu trees.
//!
//! ## Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input (flat, CMS order)           Output (tree)                        │
//! │                                                                         │
//! │  1 Фискални устройства  parent=∅   Фискални устройства       level 0   │
//! │  2 Касови апарати       parent=1   ├── Касови апарати        level 1   │
//! │  3 POS оборудване       parent=∅   └── Фискални принтери     level 1   │
//! │  4 Фискални принтери    parent=1   POS оборудване            level 0   │
//! │                                                                         │
//! │  flatten_for_display:  "" Фискални устройства                           │
//! │                        "→ " Касови апарати                              │
//! │                        "→ " Фискални принтери                           │
//! │                        "" POS оборудване                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Malformed Data
//! Every category id is expanded at most once. A parent cycle therefore ends
//! the descent instead of looping. Categories no real root reaches (members
//! of a cycle, or children of a parent missing from the input) are promoted
//! to roots in input order, so they stay reachable from the menu.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Category;

/// Marker repeated once per level in flattened menus.
pub const LEVEL_MARKER: &str = "→";

// =============================================================================
// Menu Node
// =============================================================================

/// A category positioned in the menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Depth below the nearest root (root = 0).
    pub level: u32,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Number of nodes in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(MenuNode::subtree_len).sum::<usize>()
    }
}

/// One row of a flattened menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatMenuEntry<'a> {
    pub node: &'a MenuNode,
    /// Cosmetic indentation, e.g. `"→→ "` at level 2.
    pub prefix: String,
}

// =============================================================================
// Tree Building
// =============================================================================

/// Builds the menu tree from a flat category list.
///
/// Sibling order follows input order; pre-sort the input for alphabetical
/// menus. Never fails and never loops, whatever the parent pointers say.
pub fn build_menu_tree(categories: &[Category]) -> Vec<MenuNode> {
    let mut children_of: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, category) in categories.iter().enumerate() {
        if let Some(parent) = category.parent.as_deref() {
            children_of.entry(parent).or_default().push(index);
        }
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(categories.len());
    let mut tree = Vec::new();

    for (index, category) in categories.iter().enumerate() {
        if category.is_root() {
            if let Some(node) = attach(index, 0, categories, &children_of, &mut visited) {
                tree.push(node);
            }
        }
    }

    // Second pass: anything still unvisited hangs off a cycle or a missing parent.
    for index in 0..categories.len() {
        if let Some(node) = attach(index, 0, categories, &children_of, &mut visited) {
            tree.push(node);
        }
    }

    tree
}

fn attach<'a>(
    index: usize,
    level: u32,
    categories: &'a [Category],
    children_of: &HashMap<&'a str, Vec<usize>>,
    visited: &mut HashSet<&'a str>,
) -> Option<MenuNode> {
    let category = &categories[index];
    if !visited.insert(category.id.as_str()) {
        return None;
    }

    let children = children_of
        .get(category.id.as_str())
        .map(|indices| {
            indices
                .iter()
                .filter_map(|&child| attach(child, level + 1, categories, children_of, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(MenuNode {
        id: category.id.clone(),
        name: category.name.clone(),
        slug: category.slug.clone(),
        level,
        children,
    })
}

// =============================================================================
// Flattening
// =============================================================================

/// Depth-first, pre-order listing for indentation-style menus.
pub fn flatten_for_display(tree: &[MenuNode]) -> Vec<FlatMenuEntry<'_>> {
    let mut entries = Vec::new();
    for node in tree {
        push_pre_order(node, &mut entries);
    }
    entries
}

fn push_pre_order<'a>(node: &'a MenuNode, entries: &mut Vec<FlatMenuEntry<'a>>) {
    entries.push(FlatMenuEntry {
        node,
        prefix: level_prefix(node.level),
    });
    for child in &node.children {
        push_pre_order(child, entries);
    }
}

/// `""` for roots, otherwise the marker repeated `level` times plus a space.
pub fn level_prefix(level: u32) -> String {
    if level == 0 {
        return String::new();
    }
    format!("{} ", LEVEL_MARKER.repeat(level as usize))
}

/// Finds a node anywhere in the tree by slug.
pub fn find_by_slug<'a>(tree: &'a [MenuNode], slug: &str) -> Option<&'a MenuNode> {
    tree.iter().find_map(|node| {
        if node.slug == slug {
            Some(node)
        } else {
            find_by_slug(&node.children, slug)
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, slug: &str, parent: Option<&str>) -> Category {
        let category = Category::new(id, slug.to_uppercase(), slug);
        match parent {
            Some(parent) => category.with_parent(parent),
            None => category,
        }
    }

    /// Hops from a category to its root in the parent-pointer input.
    fn depth(categories: &[Category], id: &str) -> u32 {
        let mut hops = 0;
        let mut current = categories.iter().find(|c| c.id == id).unwrap();
        while let Some(parent) = current.parent.as_deref() {
            current = categories.iter().find(|c| c.id == parent).unwrap();
            hops += 1;
        }
        hops
    }

    fn sample() -> Vec<Category> {
        vec![
            cat("1", "fiskalni-ustroystva", None),
            cat("2", "kasovi-aparati", Some("1")),
            cat("3", "pos-oborudvane", None),
            cat("4", "fiskalni-printeri", Some("1")),
            cat("5", "elektronni-vezni", Some("3")),
            cat("6", "tezgyahi", Some("5")),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(build_menu_tree(&[]).is_empty());
        assert!(flatten_for_display(&[]).is_empty());
    }

    #[test]
    fn test_builds_levels_and_order() {
        let tree = build_menu_tree(&sample());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].slug, "fiskalni-ustroystva");
        assert_eq!(tree[0].level, 0);

        let children: Vec<&str> = tree[0].children.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(children, vec!["kasovi-aparati", "fiskalni-printeri"]);
        assert!(tree[0].children.iter().all(|c| c.level == 1));

        assert_eq!(tree[1].children[0].children[0].slug, "tezgyahi");
        assert_eq!(tree[1].children[0].children[0].level, 2);
    }

    #[test]
    fn test_flatten_round_trip() {
        let categories = sample();
        let tree = build_menu_tree(&categories);
        let flat = flatten_for_display(&tree);

        assert_eq!(flat.len(), categories.len());
        let mut seen = HashSet::new();
        for entry in &flat {
            assert!(seen.insert(entry.node.id.clone()), "duplicate {}", entry.node.id);
            assert_eq!(entry.node.level, depth(&categories, &entry.node.id));
        }
    }

    #[test]
    fn test_flatten_pre_order_and_prefixes() {
        let tree = build_menu_tree(&sample());
        let flat: Vec<(String, &str)> = flatten_for_display(&tree)
            .iter()
            .map(|e| (e.prefix.clone(), e.node.slug.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("".to_string(), "fiskalni-ustroystva"),
                ("→ ".to_string(), "kasovi-aparati"),
                ("→ ".to_string(), "fiskalni-printeri"),
                ("".to_string(), "pos-oborudvane"),
                ("→ ".to_string(), "elektronni-vezni"),
                ("→→ ".to_string(), "tezgyahi"),
            ]
        );
    }

    #[test]
    fn test_two_cycle_terminates() {
        let categories = vec![cat("a", "a", Some("b")), cat("b", "b", Some("a"))];
        let tree = build_menu_tree(&categories);

        let total: usize = tree.iter().map(MenuNode::subtree_len).sum();
        assert_eq!(total, 2);
        assert_eq!(tree[0].id, "a");
        assert_eq!(tree[0].children[0].id, "b");
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_self_parent_terminates() {
        let categories = vec![cat("a", "a", Some("a"))];
        let tree = build_menu_tree(&categories);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_cycle_beside_real_root() {
        // x and y point at each other; r and z form a healthy branch
        let categories = vec![
            cat("r", "r", None),
            cat("x", "x", Some("y")),
            cat("y", "y", Some("x")),
            cat("z", "z", Some("r")),
        ];
        let tree = build_menu_tree(&categories);
        let total: usize = tree.iter().map(MenuNode::subtree_len).sum();
        assert_eq!(total, 4);
        assert_eq!(tree[0].id, "r");
    }

    #[test]
    fn test_missing_parent_promoted_to_root() {
        let categories = vec![cat("1", "root", None), cat("2", "orphan", Some("404"))];
        let tree = build_menu_tree(&categories);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].slug, "orphan");
        assert_eq!(tree[1].level, 0);
    }

    #[test]
    fn test_input_not_mutated() {
        let categories = sample();
        let before = categories.clone();
        let _ = build_menu_tree(&categories);
        assert_eq!(categories, before);
    }

    #[test]
    fn test_level_prefix() {
        assert_eq!(level_prefix(0), "");
        assert_eq!(level_prefix(1), "→ ");
        assert_eq!(level_prefix(2), "→→ ");
    }

    #[test]
    fn test_find_by_slug() {
        let tree = build_menu_tree(&sample());
        assert_eq!(find_by_slug(&tree, "tezgyahi").map(|n| n.level), Some(2));
        assert!(find_by_slug(&tree, "missing").is_none());
    }
}
