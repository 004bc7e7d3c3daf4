//! # TokenGate Core
//!
//! Core domain layer for the TokenGate authentication subsystem.
//! This crate contains the token codec, session entities, store traits,
//! the auth orchestration service, and the error taxonomy shared by the
//! infrastructure and client crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
