//! Document persistence.
//!
//! The application layer talks to storage only through [`DocumentStore`], an
//! asynchronous collection/id → JSON document map. The engines never touch
//! it; the controller persists their outputs.
//!
//! | Store | Backing | Crate |
//! |-------|---------|-------|
//! | [`MemoryStore`] | process-local `DashMap` | here |
//! | [`SqliteStore`] | SQLite file (local storage) | here |
//! | `RemoteStore` | HTTP document service | `mdvita-remote` |

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::types::DocumentId;

/// Asynchronous document store keyed by `(collection, id)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `data`. With `id = None` a fresh [`DocumentId`] is generated;
    /// otherwise the document at `id` is replaced. Returns the id written.
    async fn write(&self, collection: &str, id: Option<&str>, data: Value) -> Result<DocumentId>;

    /// Fetch a document, `None` if it does not exist.
    async fn read(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// All documents in a collection, oldest first.
    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Value)>>;

    /// Remove a document. Returns `true` if one was deleted.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;

    /// Shallow-merge the top-level fields of `patch` into the document at
    /// `id`, creating it if absent.
    async fn merge(&self, collection: &str, id: &str, patch: Value) -> Result<()> {
        let merged = match self.read(collection, id).await? {
            Some(existing) => merge_objects(existing, patch),
            None => patch,
        };
        self.write(collection, Some(id), merged).await?;
        Ok(())
    }
}

/// Overlay the top-level keys of `patch` onto `base`. Non-object values are
/// replaced wholesale.
#[must_use]
pub fn merge_objects(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base), Value::Object(patch)) => {
            for (k, v) in patch {
                base.insert(k, v);
            }
            Value::Object(base)
        }
        (_, patch) => patch,
    }
}

/// Serialize `record` and write it.
///
/// # Errors
/// Returns `VitaError::Serialization` if encoding fails, or the store's error.
pub async fn write_record<S, T>(store: &S, collection: &str, id: Option<&str>, record: &T) -> Result<DocumentId>
where
    S: DocumentStore + ?Sized,
    T: Serialize + Sync + ?Sized,
{
    let data = serde_json::to_value(record)?;
    store.write(collection, id, data).await
}

/// Read and decode a record.
///
/// # Errors
/// Returns `VitaError::Serialization` if the stored document does not decode
/// as `T`, or the store's error.
pub async fn read_record<S, T>(store: &S, collection: &str, id: &str) -> Result<Option<T>>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    match store.read(collection, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Read and decode every record in a collection, oldest first.
///
/// # Errors
/// Returns `VitaError::Serialization` on the first document that does not
/// decode as `T`, or the store's error.
pub async fn list_records<S, T>(store: &S, collection: &str) -> Result<Vec<T>>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .list(collection)
        .await?
        .into_iter()
        .map(|(_, v)| serde_json::from_value(v).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overlays_top_level_fields() {
        let merged = merge_objects(
            json!({"name": "Ada", "streak": 1, "journalEntries": 4}),
            json!({"streak": 2, "lastActivity": "2026-01-01T00:00:00Z"}),
        );
        assert_eq!(
            merged,
            json!({"name": "Ada", "streak": 2, "journalEntries": 4, "lastActivity": "2026-01-01T00:00:00Z"})
        );
    }

    #[test]
    fn merge_replaces_non_objects() {
        assert_eq!(merge_objects(json!(1), json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge_objects(json!({"a": 1}), json!([1])), json!([1]));
    }
}
