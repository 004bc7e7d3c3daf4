//! Token codec module for JWT management
//!
//! This module handles signing and verification of the two token
//! classes. Each class has its own secret: an attacker who captures an
//! access token (sent on every request) cannot forge a refresh token.

mod codec;
mod config;


pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
