pub mod auth_response;

pub use auth_response::{AuthenticatedUser, LoginResponse};
