//! Chat message domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use planwise_core::{ChatRole, MessageId};

/// A single message in a user's conversation history.
///
/// Messages are immutable once created; history is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: MessageId,
    /// Who authored the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message authored by the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create a message authored by the assistant.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
