//! Authentication service.
//!
//! Email/password authentication over the injected key-value store, with
//! a single restored session per process.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::sync::RwLock;
use tracing::instrument;

use planwise_core::{Email, UserId};

use crate::db::{CredentialRecord, CredentialRepository, RepositoryError, SessionRepository};
use crate::models::user::User;
use crate::storage::KeyValueStore;

/// State of the active session.
#[derive(Debug, Clone)]
enum SessionState {
    /// Startup restoration has not run yet.
    Loading,
    /// Restoration ran and found no user, or the user logged out.
    Anonymous,
    /// A user is signed in.
    Authenticated(User),
}

/// Authentication service.
///
/// Handles signup, login, logout, and startup session restoration. Every
/// mutating operation updates the in-memory session state and writes
/// through to durable storage before returning.
pub struct AuthService {
    credentials: CredentialRepository,
    sessions: SessionRepository,
    state: RwLock<SessionState>,
}

impl AuthService {
    /// Create an authentication service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            credentials: CredentialRepository::new(Arc::clone(&store)),
            sessions: SessionRepository::new(store),
            state: RwLock::new(SessionState::Loading),
        }
    }

    /// Restore a previously persisted session.
    ///
    /// Called once at startup. The first call reads the persisted session
    /// record and resolves the loading state exactly once; subsequent
    /// calls return the current user without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the persisted record cannot be
    /// read.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<Option<User>, AuthError> {
        {
            let state = self.state.read().await;
            match &*state {
                SessionState::Loading => {}
                SessionState::Anonymous => return Ok(None),
                SessionState::Authenticated(user) => return Ok(Some(user.clone())),
            }
        }

        let mut state = self.state.write().await;
        // Another caller may have resolved the state while we waited
        if let SessionState::Loading = &*state {
            *state = match self.sessions.load().await? {
                Some(user) => SessionState::Authenticated(user),
                None => SessionState::Anonymous,
            };
        }

        match &*state {
            SessionState::Authenticated(user) => Ok(Some(user.clone())),
            _ => Ok(None),
        }
    }

    /// Whether startup restoration has not yet resolved.
    ///
    /// Reports `true` only before the first [`restore_session`] call
    /// completes (or a login/signup resolves the state first).
    ///
    /// [`restore_session`]: Self::restore_session
    pub async fn is_loading(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Loading)
    }

    /// The currently signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown,
    /// malformed, or the password is wrong — the error does not
    /// distinguish which.
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // A malformed email cannot match any account; collapsing the parse
        // failure into InvalidCredentials keeps accounts unprobeable
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let record = self
            .credentials
            .find(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &record.password_hash)?;

        let user = User::from_email(record.user_id, email);
        self.set_session(user.clone()).await?;

        Ok(user)
    }

    /// Register a new account with email and password.
    ///
    /// On success the new user is signed in and the session is persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::EmailTaken` if the email already has an account.
    #[instrument(skip(self, email, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let password_hash = hash_password(password)?;
        let user_id = UserId::generate();

        self.credentials
            .insert_new(
                &email,
                CredentialRecord {
                    password_hash,
                    user_id: user_id.clone(),
                },
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let user = User::from_email(user_id, email);
        self.set_session(user.clone()).await?;

        Ok(user)
    }

    /// Sign out the current user.
    ///
    /// Clears the in-memory session and removes the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the persisted record cannot be
    /// removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let mut state = self.state.write().await;
        self.sessions.clear().await?;
        *state = SessionState::Anonymous;
        Ok(())
    }

    /// Set `user` as the active session and persist it.
    async fn set_session(&self, user: User) -> Result<(), AuthError> {
        let mut state = self.state.write().await;
        self.sessions.save(&user).await?;
        *state = SessionState::Authenticated(user);
        Ok(())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
