//! Error types and result handling for Kisetsu operations.
//!
//! All fallible operations return a [`Result<T>`], a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! Every [`enum@Error`] belongs to one [`ErrorKind`]:
//!
//! - **Network**: transport failures, non-success HTTP statuses, rate limiting
//! - **Parse**: bodies that are not JSON or do not have the expected shape
//! - **NotFound**: a nominally successful call whose `data` is empty or null
//! - **Other**: configuration, IO and everything else
//!
//! Pages do not branch on the kind. They collapse every error into a single
//! message (see [`Phase::Error`](crate::fetch::Phase::Error)).
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::error::{Error, ErrorKind};
//!
//! let error = Error::not_found("anime 999");
//! assert_eq!(error.kind(), ErrorKind::NotFound);
//! assert_eq!(error.to_string(), "Not found: anime 999");
//! ```

use thiserror::Error;

/// Type alias for Results with Kisetsu errors.
///
/// ```rust
/// use kisetsu::{Error, Result};
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Missing mal_id"))
/// }
/// assert!(example_with_error().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`enum@Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    NotFound,
    Other,
}

/// Error type for all Kisetsu operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport errors from the HTTP client (connection refused, DNS, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status outside the success range.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The server answered 429. No retry is attempted.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimit { retry_after: Option<u64> },

    /// The response did not have the expected structure.
    ///
    /// ```rust
    /// use kisetsu::Error;
    ///
    /// let error = Error::parse("Expected an episode array");
    /// assert!(error.to_string().contains("episode array"));
    /// ```
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON decoding failures from serde_json.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request succeeded but carried no usable record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// File system errors (config and log directories).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a not found error with the given message.
    ///
    /// ```rust
    /// use kisetsu::Error;
    ///
    /// let error = Error::not_found("Anime with id 999");
    /// ```
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Creates a rate limit error with optional retry-after time.
    ///
    /// The value usually comes from the `Retry-After` header.
    pub fn rate_limit(retry_after: Option<u64>) -> Self {
        Error::RateLimit { retry_after }
    }

    /// Creates an HTTP status error for the given URL.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Error::Http {
            status,
            url: url.into(),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Returns the category this error belongs to.
    ///
    /// ```rust
    /// use kisetsu::error::{Error, ErrorKind};
    ///
    /// assert_eq!(Error::http(404, "https://example.com").kind(), ErrorKind::Network);
    /// assert_eq!(Error::rate_limit(None).kind(), ErrorKind::Network);
    /// assert_eq!(Error::parse("bad").kind(), ErrorKind::Parse);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(e) if e.is_decode() => ErrorKind::Parse,
            Error::Network(_) | Error::Http { .. } | Error::RateLimit { .. } => ErrorKind::Network,
            Error::Parse(_) | Error::Json(_) => ErrorKind::Parse,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Config(_) | Error::Io(_) | Error::Other(_) => ErrorKind::Other,
        }
    }
}
