//! HTTP client abstraction for testability

use super::RemoteError;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default User-Agent string for HTTP requests.
/// Some tile servers reject requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("tilesnap/", env!("CARGO_PKG_VERSION"));

/// A fully-read HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Headers keyed by lower-case name
    pub headers: HashMap<String, String>,
    /// Decompressed body bytes
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response with no headers.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header, normalising its name to lower case.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows the remote tile source to be tested with mock
/// clients instead of a network.
pub trait AsyncHttpClient: Send + Sync + 'static {
    /// Performs an async HTTP GET request.
    ///
    /// Any status code is returned as a response; only transport failures
    /// are errors.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send;
}

/// Async HTTP client implementation using reqwest.
///
/// Negotiates gzip and decompresses transparently. Idle connections are not
/// kept, so every fetch opens its own connection.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new AsyncReqwestClient with default configuration.
    ///
    /// Requests have no deadline; a caller that needs one wraps the whole
    /// render call.
    pub fn new() -> Result<Self, RemoteError> {
        Self::with_config(None, DEFAULT_USER_AGENT)
    }

    /// Creates a new AsyncReqwestClient with an optional timeout and a
    /// custom User-Agent.
    pub fn with_config(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .pool_max_idle_per_host(0);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| RemoteError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, RemoteError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(RemoteError::Transport {
                    url: url.to_string(),
                    source: Box::new(e),
                });
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        match response.bytes().await {
            Ok(body) => {
                trace!(url = url, bytes = body.len(), "HTTP response body read");
                Ok(HttpResponse {
                    status,
                    headers,
                    body,
                })
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(RemoteError::Transport {
                    url: url.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }
}
