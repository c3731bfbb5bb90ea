//! Planwise assistant library.
//!
//! Backend services for the mobile-plan assistant: email/password
//! authentication over a pluggable key-value store, per-user conversation
//! history around an external AI answer service, and carrier signal
//! prediction with a built-in fallback dataset.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
