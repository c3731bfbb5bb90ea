//! Chat role enum shared by conversation storage and the AI client.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
///
/// Every stored message is attributed to either the account holder or the
/// assistant; there is no system role in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// Message written by the signed-in user.
    User,
    /// Message produced by the assistant.
    Assistant,
}

impl ChatRole {
    /// String representation matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
