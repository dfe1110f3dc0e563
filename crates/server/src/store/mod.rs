//! Persistence: document store and key-value store.

pub mod document;
pub mod entities;
pub mod kv;
pub mod memory;
pub mod sea;

pub use document::{Collection, Document, DocumentStore};
#[cfg(test)]
pub use document::MockDocumentStore;
pub use kv::{KeyValueBackend, KeyValueStore, MemoryBackend, RedisBackend};
pub use memory::MemoryDocumentStore;
pub use sea::SeaDocumentStore;
