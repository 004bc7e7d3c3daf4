pub mod session;
pub mod token;

pub use session::{ClientMeta, Session, SessionState};
pub use token::{Claims, TokenClass, TokenPair};
