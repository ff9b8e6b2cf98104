use std::time::Duration;
use log::{debug, error, warn};
use thiserror::Error;

use crate::helpers::retry::{RetryHandler, Retryable};

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("lyricscorpora/", env!("CARGO_PKG_VERSION"));

/// Error types that can occur when fetching pages
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request error: {0}")]
    RequestError(String),

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Empty response from server")]
    EmptyResponse,
}

impl HttpClientError {
    /// Whether the same request might succeed if it is sent again
    pub fn is_transient(&self) -> bool {
        match self {
            HttpClientError::RequestError(_) => true,
            HttpClientError::StatusError { status, .. } => *status == 429 || *status >= 500,
            HttpClientError::NotFound(_)
            | HttpClientError::ParseError(_)
            | HttpClientError::EmptyResponse => false,
        }
    }
}

impl Retryable for HttpClientError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

/// A trait for HTTP client implementations
/// This version avoids generic methods to enable dynamic dispatch
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Send a GET request and return the response body
    fn get(&self, url: &str) -> Result<String, HttpClientError>;

    /// Clone the client as a boxed trait object
    fn clone_box(&self) -> Box<dyn HttpClient>;
}

impl Clone for Box<dyn HttpClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_user_agent(timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with the specified timeout and User-Agent
    pub fn with_user_agent(timeout_secs: u64, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build();
        Self { agent }
    }
}

impl Default for UreqHttpClient {
    /// Create a new HTTP client with default timeout (10 seconds)
    fn default() -> Self {
        Self::new(10)
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        debug!("GET request to {}", url);

        let response = match self.agent.get(url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(404, _)) => {
                debug!("GET {} returned 404", url);
                return Err(HttpClientError::NotFound(url.to_string()));
            }
            Err(ureq::Error::Status(status, _)) => {
                warn!("GET {} returned status {}", url, status);
                return Err(HttpClientError::StatusError {
                    status,
                    url: url.to_string(),
                });
            }
            Err(e) => {
                error!("GET request failed: {}", e);
                return Err(HttpClientError::RequestError(e.to_string()));
            }
        };

        let text = match response.into_string() {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read response body: {}", e);
                return Err(HttpClientError::ParseError(format!("Failed to read response body: {}", e)));
            }
        };

        if text.is_empty() {
            return Err(HttpClientError::EmptyResponse);
        }
        Ok(text)
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Wraps another client and retries transient failures
#[derive(Clone, Debug)]
pub struct RetryingHttpClient {
    inner: Box<dyn HttpClient>,
    max_retries: usize,
    interval: Duration,
}

impl RetryingHttpClient {
    /// Retry each transient failure up to `max_retries` times, waiting `interval` in between
    pub fn new(inner: Box<dyn HttpClient>, max_retries: usize, interval: Duration) -> Self {
        Self {
            inner,
            max_retries,
            interval,
        }
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

impl HttpClient for RetryingHttpClient {
    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        RetryHandler::fixed(self.max_retries, self.interval).execute_with_retry(|| self.inner.get(url), url)
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Create a new HTTP client using the default implementation
///
/// # Arguments
/// * `timeout_secs` - Per-request timeout
/// * `user_agent` - User-Agent header value
/// * `max_retries` - Number of extra attempts for transient failures (0 disables retrying)
/// * `retry_interval` - Pause between attempts
pub fn new_http_client(
    timeout_secs: u64,
    user_agent: &str,
    max_retries: usize,
    retry_interval: Duration,
) -> Box<dyn HttpClient> {
    let client: Box<dyn HttpClient> = Box::new(UreqHttpClient::with_user_agent(timeout_secs, user_agent));
    if max_retries == 0 {
        client
    } else {
        Box::new(RetryingHttpClient::new(client, max_retries, retry_interval))
    }
}
