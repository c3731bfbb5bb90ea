//! Domain models for the assistant.

pub mod chat;
pub mod prediction;
pub mod user;
