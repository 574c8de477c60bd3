//! A named, copy-on-write set of indexed vectors.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use triage_core::models::{EmbeddingVector, Metadata};

/// One indexed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredItem {
    pub embedding: EmbeddingVector,
    pub metadata: Metadata,
}

impl StoredItem {
    pub fn id(&self) -> &str {
        &self.embedding.id
    }
}

/// Items keyed by id.
///
/// Mutations serialize on the write lock and publish a new map; searches
/// clone the current `Arc` and iterate it lock-free.
#[derive(Debug)]
pub struct Collection {
    name: String,
    items: RwLock<Arc<HashMap<String, StoredItem>>>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vector set as of this instant.
    pub fn snapshot(&self) -> Arc<HashMap<String, StoredItem>> {
        Arc::clone(&*self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Insert or replace items by id. Returns how many replaced an existing id.
    pub fn upsert(&self, items: Vec<StoredItem>) -> usize {
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let map = Arc::make_mut(&mut *guard);
        items
            .into_iter()
            .filter_map(|item| map.insert(item.embedding.id.clone(), item))
            .count()
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if !guard.contains_key(id) {
            return false;
        }
        Arc::make_mut(&mut *guard).remove(id).is_some()
    }

    /// Drop every item. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let removed = guard.len();
        *guard = Arc::new(HashMap::new());
        removed
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
