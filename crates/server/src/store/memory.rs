//! In-process document store.
//!
//! Used by `STORE_BACKEND=memory` for local development and by the router
//! tests. Data is lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use common::AppResult;
use domain::ServerTimestamp;

use super::document::{Document, DocumentStore};

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document verbatim, timestamps included.
    pub async fn seed(&self, collection: &str, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            fields,
            created_at: ServerTimestamp::Pending.resolve(Utc::now()),
            updated_at: ServerTimestamp::Pending,
        };
        debug!("Inserting {}/{}", collection, document.id);

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return Ok(None);
        };

        document.fields.extend(patch);
        document.updated_at = ServerTimestamp::Resolved(Utc::now());
        debug!("Updated {}/{}", collection, id);
        Ok(Some(document.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_stamps_created_at_only() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("properties", fields(json!({"location": "Cebu"})))
            .await
            .unwrap();

        assert!(matches!(doc.created_at, ServerTimestamp::Resolved(_)));
        assert_eq!(doc.updated_at, ServerTimestamp::Pending);
    }

    #[tokio::test]
    async fn test_update_merges_and_stamps() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("properties", fields(json!({"location": "Cebu", "price": "1"})))
            .await
            .unwrap();

        let updated = store
            .update("properties", &doc.id, fields(json!({"price": "2"})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.fields["location"], json!("Cebu"));
        assert_eq!(updated.fields["price"], json!("2"));
        assert!(matches!(updated.updated_at, ServerTimestamp::Resolved(_)));
    }

    #[tokio::test]
    async fn test_find_by_field_and_delete() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("properties", fields(json!({"location": "Davao"})))
            .await
            .unwrap();

        let found = store
            .find_by_field("properties", "location", &json!("Davao"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        assert!(store.delete("properties", &doc.id).await.unwrap());
        assert!(!store.delete("properties", &doc.id).await.unwrap());
        assert!(store.get("properties", &doc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = MemoryDocumentStore::new();
        let result = store.update("payments", "nope", Map::new()).await.unwrap();
        assert!(result.is_none());
    }
}
