//! Response cache for read endpoints.
//!
//! Every entry is tagged with the website page path it feeds. Revalidating a
//! path evicts the entries tagged with that path or any path below it, so
//! `/products` also drops `/products/daisy-compact-s` and `/` drops everything.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedResponse {
    page_path: String,
    body: Value,
}

/// JSON bodies keyed by request (path plus normalized query).
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).map(|e| e.body.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, page_path: &str, body: Value) {
        self.entries.write().await.insert(
            key.into(),
            CachedResponse {
                page_path: page_path.to_string(),
                body,
            },
        );
    }

    /// Evicts entries under `path`; returns how many were dropped.
    pub async fn evict(&self, path: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !is_under(&entry.page_path, path));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Segment-aware prefix check: `/products` covers `/products/x` but not
/// `/products-old`.
fn is_under(page_path: &str, path: &str) -> bool {
    if path == "/" || page_path == path {
        return true;
    }
    page_path
        .strip_prefix(path)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}
