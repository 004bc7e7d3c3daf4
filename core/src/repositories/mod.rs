pub mod revocation;
pub mod session;

pub use revocation::RevocationStore;
pub use session::SessionRepository;

#[cfg(test)]
pub use revocation::MockRevocationStore;
#[cfg(test)]
pub use session::MockSessionRepository;
