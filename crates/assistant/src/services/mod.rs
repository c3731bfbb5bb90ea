//! Business logic services.
//!
//! - [`auth`] - signup, login, logout, session restoration
//! - [`chat`] - per-user conversations around the AI answer flow
//! - [`signal`] - carrier signal prediction with a fixed fallback

pub mod auth;
pub mod chat;
pub mod signal;

pub use auth::{AuthError, AuthService};
pub use chat::{ChatReply, ConversationService};
pub use signal::SignalService;
