//! Network utilities for HTTP requests and JSON envelope handling.
//!
//! This module provides the networking layer for Kisetsu:
//!
//! - **HTTP Client**: a shared, lazily built `reqwest` client with connection pooling
//! - **Status mapping**: non-success statuses become typed errors
//! - **Envelope parsing**: helpers for the `{data, pagination}` responses in [`json`]
//!
//! Requests are issued exactly once. There are no retries and no client-side
//! timeout, so the transport default applies.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kisetsu::net::HttpClient;
//!
//! # async fn example() -> kisetsu::Result<()> {
//! let client = HttpClient::new("jikan");
//! let json: serde_json::Value = client.get_json("https://api.jikan.moe/v4/anime/1").await?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode, header::HeaderMap};
use tracing::{debug, warn};

pub mod json;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("Kisetsu/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance.
///
/// Configured with a pool of 10 idle connections per host and gzip/brotli
/// decompression. No timeout is set.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// HTTP client wrapper bound to one source.
///
/// The source id only tags log lines and errors. Each client carries its own
/// header set, applied to every request.
#[derive(Clone, Debug)]
pub struct HttpClient {
    source_id: String,
    headers: HeaderMap,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified source.
    ///
    /// ```rust
    /// use kisetsu::net::HttpClient;
    ///
    /// let client = HttpClient::new("jikan");
    /// assert_eq!(client.source_id(), "jikan");
    /// ```
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            headers: HeaderMap::new(),
        }
        .with_header("User-Agent", DEFAULT_USER_AGENT)
    }

    /// Adds a custom header to all requests made by this client.
    ///
    /// Invalid header names or values are ignored.
    ///
    /// ```rust
    /// use kisetsu::net::HttpClient;
    ///
    /// let client = HttpClient::new("jikan").with_header("Accept", "application/json");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns the identifier this client was created with.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Performs a single GET request and returns the body.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`](crate::Error::Network) - the transport failed
    /// * [`Error::RateLimit`](crate::Error::RateLimit) - the server answered 429
    /// * [`Error::Http`](crate::Error::Http) - any other non-success status
    pub async fn get(&self, url: &str) -> crate::Result<Bytes> {
        debug!(source = %self.source_id, url = %url, "GET");

        let response = CLIENT
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .inspect_err(|e| warn!(source = %self.source_id, url = %url, error = %e, "request failed"))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?);
        }

        warn!(source = %self.source_id, url = %url, status = %status, "unsuccessful status");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(crate::Error::rate_limit(retry_after));
        }

        Err(crate::Error::http(status.as_u16(), url))
    }

    /// Performs a GET request and deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// * All errors from [`get()`](HttpClient::get)
    /// * [`Error::Json`](crate::Error::Json) - the body is not valid JSON for `T`
    pub async fn get_json<T>(&self, url: &str) -> crate::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = self.get(url).await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}
