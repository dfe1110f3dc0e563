//! Local messaging state. Nothing here is persisted or sent to the server.

use domain::{Conversation, Message};

/// Sender id used for messages written by an admin.
pub const ADMIN_SENDER: &str = "admin";
/// Sender id used for messages written by everyone else.
pub const MEMBER_SENDER: &str = "1";

#[derive(Debug, Clone)]
pub struct Messenger {
    is_admin: bool,
    conversations: Vec<Conversation>,
    selected: Option<String>,
    query: String,
}

impl Messenger {
    /// Admins pick from the full client list.
    pub fn for_admin(conversations: Vec<Conversation>) -> Self {
        Self {
            is_admin: true,
            conversations,
            selected: None,
            query: String::new(),
        }
    }

    /// Agents and clients talk to a single representative, preselected.
    pub fn for_member(representative: Conversation) -> Self {
        Self {
            is_admin: false,
            selected: Some(representative.id.clone()),
            conversations: vec![representative],
            query: String::new(),
        }
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    /// Conversations whose name matches the search; empty for non-admins.
    pub fn conversations(&self) -> Vec<&Conversation> {
        if !self.is_admin {
            return Vec::new();
        }
        self.conversations
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&self.query))
            .collect()
    }

    pub fn select(&mut self, id: &str) -> bool {
        let known = self.conversations.iter().any(|c| c.id == id);
        if known {
            self.selected = Some(id.to_string());
        }
        known
    }

    pub fn selected(&self) -> Option<&Conversation> {
        let id = self.selected.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Append a message to the selected conversation.
    ///
    /// Blank content or no selection is ignored. `now_millis` doubles as the
    /// message id.
    pub fn send(&mut self, content: &str, now_millis: i64) -> Option<&Message> {
        if content.trim().is_empty() {
            return None;
        }
        let id = self.selected.as_deref()?;
        let sender_id = if self.is_admin { ADMIN_SENDER } else { MEMBER_SENDER };

        let conversation = self.conversations.iter_mut().find(|c| c.id == id)?;
        conversation.messages.push(Message {
            id: now_millis.to_string(),
            content: content.to_string(),
            timestamp: now_millis,
            sender_id: sender_id.to_string(),
        });
        conversation.messages.last()
    }
}

/// Avatar initials, e.g. `"Juan dela Cruz"` -> `"JDC"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
