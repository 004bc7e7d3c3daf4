pub mod auth;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig};
pub use token::{TokenCodec, TokenCodecConfig};
