//! Client-side error types

/// Errors surfaced by the client pipeline
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level HTTP failure
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// An application request exceeded its deadline
    #[error("Request timed out after {seconds}s")]
    RequestTimedOut { seconds: u64 },

    /// The refresh endpoint rejected the refresh token
    ///
    /// The session is over; the caller must re-authenticate.
    #[error("Token refresh rejected with status {status}")]
    RefreshRejected { status: u16 },

    /// The refresh call exceeded its deadline
    ///
    /// Treated as a refresh failure, never left hanging; the session
    /// is over from the client's point of view.
    #[error("Token refresh timed out after {seconds}s")]
    RefreshTimedOut { seconds: u64 },

    /// The refresh endpoint answered with an unusable body
    #[error("Malformed refresh response: {message}")]
    MalformedRefreshResponse { message: String },

    /// No tokens are held; the store was cleared or never filled
    #[error("Not authenticated; log in first")]
    NotAuthenticated,

    /// General client error
    #[error("Client error: {0}")]
    General(String),
}

impl ClientError {
    /// Whether this error means the session is over and the user must
    /// log in again
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::RefreshRejected { .. }
                | ClientError::RefreshTimedOut { .. }
                | ClientError::NotAuthenticated
        )
    }
}
