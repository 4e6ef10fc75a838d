//! Error types and result handling for leaderboard operations.
//!
//! All operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Network Errors**: Connection issues, timeouts, HTTP transport errors
//! - **API Errors**: Slack replied `ok: false` with an error code
//! - **Validation Errors**: A requested result count above the ceiling
//! - **Authorization Errors**: A blocklist toggle by a non-owner/non-admin
//! - **Not Found / Parse**: Unparseable arguments or missing resources
//! - **Rate Limiting**: The upstream API throttled a request
//! - **IO / JSON Errors**: Blocklist file access and (de)serialization
//!
//! # Examples
//!
//! ```rust
//! use pulse::{Error, Result};
//!
//! fn check_count(requested: u32) -> Result<u32> {
//!     if requested > 1000 {
//!         return Err(Error::count_too_large(requested, 1000));
//!     }
//!     Ok(requested)
//! }
//!
//! match check_count(5000) {
//!     Err(Error::CountTooLarge { requested, max }) => {
//!         println!("{} exceeds the {} ceiling", requested, max)
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Type alias for Results with leaderboard errors.
///
/// All public APIs in this crate return this Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all leaderboard operations.
///
/// Failures are surfaced to the invoking user as a reply message by the
/// host service; none of these variants should ever crash the process.
/// The `Display` text of the validation and authorization variants is
/// written to be shown to the user verbatim.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// Wraps errors from the underlying HTTP client (reqwest), including
    /// connection timeouts, DNS resolution failures, and TLS errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The Slack Web API answered `ok: false`.
    ///
    /// Carries the API method that failed and Slack's error code, e.g.
    /// `search.messages` with `not_authed`. Any API failure aborts the
    /// whole command; there is no automatic retry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulse::Error;
    ///
    /// let error = Error::api("search.messages", "invalid_auth");
    /// assert!(error.to_string().contains("search.messages"));
    /// ```
    #[error("API error [{method}]: {message}")]
    Api { method: String, message: String },

    /// Argument or response data could not be parsed as expected.
    ///
    /// Used for malformed channel mentions, non-numeric count arguments,
    /// and unexpected response structure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested result count exceeds the ceiling.
    ///
    /// Rejected before any API request is made, so an oversized request
    /// costs nothing upstream.
    #[error("Count too large: {requested} exceeds the maximum of {max}")]
    CountTooLarge { requested: u32, max: u32 },

    /// A blocklist toggle was attempted by someone who is neither the
    /// channel's creator nor a workspace admin. No mutation occurs.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The upstream API rate-limited a request.
    ///
    /// Optionally carries the number of seconds from the `Retry-After`
    /// header. The courtesy delay between search pages exists precisely
    /// to keep this from happening; when it does, the command fails.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimit { retry_after: Option<u64> },

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and IO operation errors (blocklist storage).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization and deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error messages that fit no other category.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a parse error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulse::Error;
    ///
    /// let error = Error::parse("count must be a number");
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates an API error for the given Web API method.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulse::Error;
    ///
    /// let error = Error::api("conversations.info", "channel_not_found");
    /// ```
    pub fn api(method: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Api {
            method: method.into(),
            message: msg.into(),
        }
    }

    /// Creates a not found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Creates a count-ceiling rejection.
    pub fn count_too_large(requested: u32, max: u32) -> Self {
        Error::CountTooLarge { requested, max }
    }

    /// Creates an authorization refusal with the given message.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    /// Creates a rate limit error with optional retry-after time.
    ///
    /// The retry-after parameter typically comes from the `Retry-After`
    /// HTTP header on a 429 response.
    pub fn rate_limit(retry_after: Option<u64>) -> Self {
        Error::RateLimit { retry_after }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
