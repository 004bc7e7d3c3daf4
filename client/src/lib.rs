//! # Client Request Pipeline
//!
//! Client-side counterpart to the authentication service: holds the
//! token pair, attaches the access token to outbound requests, and
//! transparently recovers from access-token expiry.
//!
//! The recovery contract is retry-once: a request that comes back 401
//! triggers one refresh and one retry; a second 401 is returned to the
//! caller as-is. Concurrent 401s coalesce into a single refresh call
//! through [`refresh::RefreshCoordinator`]. A refresh the server
//! rejects, or one that times out, ends the session: the stored tokens
//! are cleared and callers get an error whose
//! [`ClientError::requires_login`] is true. Every network call carries
//! a bounded deadline.

pub mod error;
pub mod pipeline;
pub mod refresh;
pub mod store;
pub mod transport;

pub use error::ClientError;
pub use pipeline::AuthClient;
pub use refresh::RefreshCoordinator;
pub use store::TokenStore;
pub use transport::{
    HttpExecutor, HttpRefreshTransport, OutboundRequest, OutboundResponse, RefreshTransport,
    RequestExecutor,
};
