//! Chat messages exchanged in the messaging view.
//!
//! Messages live in local view state only and are never persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub sender_id: String,
}

/// A conversation with one counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}
