use serde::{Deserialize, Serialize};

/// One chat message as the server reports it. The client renders messages
/// and never mutates them afterwards; `created_at` arrives pre-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    /// Present in group conversations.
    #[serde(default)]
    pub sender_name: Option<String>,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub is_delivered: bool,
}

/// Payload of a `/search` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub users: Vec<UserHit>,
    #[serde(default)]
    pub messages: Vec<MessageHit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.messages.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHit {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHit {
    pub chat_id: i64,
    pub sender_name: String,
    pub created_at: String,
    pub content: String,
}
