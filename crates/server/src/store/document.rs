//! Document store abstraction.
//!
//! A document is a JSON field map stored under a store-assigned id inside a
//! named collection. `created_at` is stamped on insert and `updated_at` on
//! every update; both are read back as [`ServerTimestamp`]s.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use common::{AppError, AppResult};
use domain::ServerTimestamp;

#[cfg(test)]
use mockall::automock;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
    pub created_at: ServerTimestamp,
    pub updated_at: ServerTimestamp,
}

impl Document {
    /// Decode into a typed record, folding identity and timestamps into the fields.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".into(), Value::String(self.id.clone()));
        fields.insert("created_at".into(), serde_json::to_value(self.created_at)?);
        fields.insert("updated_at".into(), serde_json::to_value(self.updated_at)?);
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Document store trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return it as stored
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Document>;

    /// Find a document by id
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// List every document of a collection in insertion order
    async fn list(&self, collection: &str) -> AppResult<Vec<Document>>;

    /// Find documents whose top-level `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> AppResult<Vec<Document>>;

    /// Shallow-merge `patch` into a document; `None` when the id is unknown
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<Option<Document>>;

    /// Delete a document; `false` when the id is unknown
    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool>;

    /// Check connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Typed view over one collection.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn all(&self) -> AppResult<Vec<T>> {
        self.store
            .list(self.name)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<T>> {
        self.store
            .get(self.name, id)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Find by id or fail with not found
    pub async fn require(&self, id: &str) -> AppResult<T> {
        self.find(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn find_by(&self, field: &str, value: &Value) -> AppResult<Vec<T>> {
        self.store
            .find_by_field(self.name, field, value)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }

    /// Insert, then re-read so the caller sees the canonical stored form.
    pub async fn insert(&self, fields: Map<String, Value>) -> AppResult<T> {
        let created = self.store.insert(self.name, fields).await?;
        self.require(&created.id).await
    }

    /// Patch, then re-read so the caller sees the canonical stored form.
    pub async fn patch(&self, id: &str, patch: Map<String, Value>) -> AppResult<T> {
        self.store
            .update(self.name, id, patch)
            .await?
            .ok_or(AppError::NotFound)?;
        self.require(id).await
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if self.store.delete(self.name, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Delete every existing id, returning the ones actually removed.
    pub async fn remove_many(&self, ids: &[String]) -> AppResult<Vec<String>> {
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if self.store.delete(self.name, id).await? {
                removed.push(id.clone());
            }
        }
        Ok(removed)
    }
}
