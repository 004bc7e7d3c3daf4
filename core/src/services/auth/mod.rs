//! Authentication service module
//!
//! Orchestrates the token codec, the session store, and the revocation
//! store behind the five entry points the rest of the application may
//! call: `login`, `authenticate`, `refresh`, `logout`, `logout_all`.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
