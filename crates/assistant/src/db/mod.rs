//! Typed repositories over the key-value store.
//!
//! The storage layer (`crate::storage`) moves raw JSON strings; the
//! repositories here give the services typed access:
//!
//! - [`CredentialRepository`] - email -> credential record map
//! - [`SessionRepository`] - the single persisted session slot
//! - [`ChatHistory`] - in-process per-user conversation log
//!
//! Credentials and the session are written through to durable storage on
//! every mutation; chat history lives for the process lifetime only.

pub mod chat;
pub mod credentials;
pub mod session;

pub use chat::ChatHistory;
pub use credentials::{CredentialRecord, CredentialRepository};
pub use session::SessionRepository;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying key-value storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
