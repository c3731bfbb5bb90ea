//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format (signup only; login folds this into
    /// `InvalidCredentials`).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] planwise_core::EmailError),

    /// Invalid credentials (wrong password or unknown email; the error
    /// does not reveal which).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already has a registered account.
    #[error("email already in use")]
    EmailTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
