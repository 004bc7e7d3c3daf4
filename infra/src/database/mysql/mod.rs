//! MySQL repository implementations

pub mod session_repository_impl;

pub use session_repository_impl::MySqlSessionRepository;
