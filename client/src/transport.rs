//! HTTP transport abstractions for the client pipeline
//!
//! The pipeline is generic over two seams: `RequestExecutor` sends an
//! application request, `RefreshTransport` talks to the token refresh
//! endpoint. The `Http*` implementations wire both to `reqwest`; tests
//! substitute scripted fakes.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Deadline for application requests
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for refresh calls
///
/// Deliberately shorter than the request deadline: a slow refresh holds
/// the single-flight gate, and every queued request waits behind it.
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// An application request before authorization is attached
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// HTTP method
    pub method: reqwest::Method,
    /// Absolute request URL
    pub url: String,
    /// Extra headers beyond the bearer token
    pub headers: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    /// Build a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: reqwest::Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a POST request with a JSON body
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: reqwest::Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// The response handed back to the caller
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl OutboundResponse {
    /// Whether the server rejected the access token
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends application requests with a bearer token attached
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        request: &OutboundRequest,
        bearer_token: &str,
    ) -> Result<OutboundResponse, ClientError>;
}

/// Talks to the token refresh endpoint
///
/// Returns the new access token, or `RefreshRejected` when the server
/// refuses the refresh token (session over).
#[async_trait]
pub trait RefreshTransport: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError>;
}

/// `reqwest`-backed request executor
///
/// Every call runs under a deadline; a request may fail, but it may
/// never hang.
pub struct HttpExecutor {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl HttpExecutor {
    /// Create an executor with a dedicated HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request deadline
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        request: &OutboundRequest,
        bearer_token: &str,
    ) -> Result<OutboundResponse, ClientError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .bearer_auth(bearer_token);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let send = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok::<_, ClientError>(OutboundResponse { status, body })
        };

        let response = timeout(self.request_timeout, send).await.map_err(|_| {
            warn!(url = %request.url, "request exceeded deadline");
            ClientError::RequestTimedOut {
                seconds: self.request_timeout.as_secs(),
            }
        })??;

        debug!(url = %request.url, status = response.status, "request completed");

        Ok(response)
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// `reqwest`-backed refresh transport
///
/// The refresh call carries its own, tighter deadline; a timeout is a
/// refresh failure, never an indefinite hang on the single-flight gate.
pub struct HttpRefreshTransport {
    client: reqwest::Client,
    refresh_url: String,
    refresh_timeout: Duration,
}

impl HttpRefreshTransport {
    /// Create a transport posting to the given refresh endpoint
    pub fn new(client: reqwest::Client, refresh_url: impl Into<String>) -> Self {
        Self {
            client,
            refresh_url: refresh_url.into(),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }

    /// Override the refresh deadline
    pub fn with_timeout(mut self, refresh_timeout: Duration) -> Self {
        self.refresh_timeout = refresh_timeout;
        self
    }
}

#[async_trait]
impl RefreshTransport for HttpRefreshTransport {
    async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError> {
        let exchange = async {
            let response = self
                .client
                .post(&self.refresh_url)
                .json(&RefreshRequest { refresh_token })
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::RefreshRejected {
                    status: status.as_u16(),
                });
            }

            response
                .json::<RefreshResponse>()
                .await
                .map_err(|e| ClientError::MalformedRefreshResponse {
                    message: e.to_string(),
                })
        };

        let parsed = timeout(self.refresh_timeout, exchange)
            .await
            .map_err(|_| {
                warn!(url = %self.refresh_url, "refresh exceeded deadline");
                ClientError::RefreshTimedOut {
                    seconds: self.refresh_timeout.as_secs(),
                }
            })??;

        if parsed.access_token.is_empty() {
            return Err(ClientError::MalformedRefreshResponse {
                message: "empty access_token".to_string(),
            });
        }

        Ok(parsed.access_token)
    }
}
