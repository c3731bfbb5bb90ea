//! Planwise Core - Shared types library.
//!
//! This crate provides common types used across all Planwise components:
//! - `assistant` - Authentication, conversation, and signal-prediction services
//! - `integration-tests` - Cross-service test flows
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids, emails, and chat roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
