//! In-process document store.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use super::DocumentStore;
use crate::error::Result;
use crate::types::DocumentId;

#[derive(Debug, Clone)]
struct Slot {
    /// Insertion sequence; kept across overwrites so listing order is stable.
    seq: u64,
    data: Value,
}

/// Document store backed by a concurrent map. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: DashMap<(String, String), Slot>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn write(&self, collection: &str, id: Option<&str>, data: Value) -> Result<DocumentId> {
        let id = id.map_or_else(DocumentId::generate, DocumentId::from);
        let key = (collection.to_string(), id.0.clone());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.docs
            .entry(key)
            .and_modify(|slot| slot.data = data.clone())
            .or_insert(Slot { seq, data });
        debug!(collection, id = %id, "Stored document in memory");
        Ok(id)
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let key = (collection.to_string(), id.to_string());
        Ok(self.docs.get(&key).map(|slot| slot.data.clone()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Value)>> {
        let mut found: Vec<(u64, DocumentId, Value)> = self
            .docs
            .iter()
            .filter(|e| e.key().0 == collection)
            .map(|e| (e.value().seq, DocumentId(e.key().1.clone()), e.value().data.clone()))
            .collect();
        found.sort_by_key(|(seq, _, _)| *seq);
        Ok(found.into_iter().map(|(_, id, data)| (id, data)).collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let key = (collection.to_string(), id.to_string());
        Ok(self.docs.remove(&key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn write_read_round_trip() {
        let store = MemoryStore::new();
        let id = store.write("moods", None, json!({"mood": 4})).await.expect("write");
        assert!(id.as_str().starts_with("doc_"));
        let doc = store.read("moods", id.as_str()).await.expect("read");
        assert_eq!(doc, Some(json!({"mood": 4})));
        assert_eq!(store.read("journal", id.as_str()).await.expect("read"), None);
    }

    #[tokio::test]
    async fn list_keeps_first_insertion_order() {
        let store = MemoryStore::new();
        store.write("c", Some("b"), json!(1)).await.expect("write");
        store.write("c", Some("a"), json!(2)).await.expect("write");
        store.write("c", Some("b"), json!(3)).await.expect("overwrite");
        store.write("other", Some("z"), json!(0)).await.expect("write");

        let listed = store.list("c").await.expect("list");
        let ids: Vec<&str> = listed.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(listed[0].1, json!(3));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn merge_and_delete() {
        let store = MemoryStore::new();
        store.merge("users", "u1", json!({"name": "Ada"})).await.expect("create");
        store.merge("users", "u1", json!({"streak": 2})).await.expect("merge");
        assert_eq!(
            store.read("users", "u1").await.expect("read"),
            Some(json!({"name": "Ada", "streak": 2}))
        );
        assert!(store.delete("users", "u1").await.expect("delete"));
        assert!(!store.delete("users", "u1").await.expect("delete again"));
        assert!(store.is_empty());
    }
}
