//! User domain types.

use serde::{Deserialize, Serialize};

use planwise_core::{Email, UserId};

/// A signed-in account.
///
/// This is also the record persisted in the session slot, so it derives
/// serde and round-trips exactly through the key-value store. Field names
/// on the wire are camelCase, matching the stored format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Name shown in the UI. Defaults to the email local part.
    pub display_name: Option<String>,
}

impl User {
    /// Build the account record for an email, deriving the display name
    /// from the email's local part.
    #[must_use]
    pub fn from_email(id: UserId, email: Email) -> Self {
        let display_name = Some(email.local_part().to_string());
        Self {
            id,
            email,
            display_name,
        }
    }
}
