//! Error types for Mailchimp API calls.
//!
//! This module provides a single normalized error type covering configuration,
//! serialization, transport, deserialization, and remote API failures, plus
//! the [`ApiError`] record the Mailchimp API returns on non-2xx responses.
//! Errors preserve raw response data where available so callers can debug
//! without re-issuing requests.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// A problem report returned by the Mailchimp API on a non-2xx response.
///
/// The wire shape is the RFC 7807-style body Mailchimp sends:
/// `{"type": ..., "title": ..., "status": ..., "detail": ...}`. Every field
/// defaults when absent, so an empty or malformed error body decodes into a
/// zero-valued record rather than failing. The HTTP failure itself must never
/// be masked by a bad error payload.
///
/// # Examples
///
/// ```
/// use mailchimp::ApiError;
///
/// let err: ApiError = serde_json::from_str(
///     r#"{"type":"t","title":"Resource Not Found","status":404,"detail":"No list found"}"#,
/// )
/// .unwrap();
/// assert_eq!(
///     err.to_string(),
///     "Error 404 Resource Not Found (No list found)"
/// );
/// ```
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[error("Error {status} {title} ({detail})")]
#[serde(default)]
pub struct ApiError {
    /// URL categorizing the problem type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short human-readable summary of the problem.
    pub title: String,
    /// HTTP status code reported in the body.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    pub detail: String,
}

/// The main error type for Mailchimp API calls.
///
/// # Examples
///
/// ```no_run
/// use mailchimp::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("0123456789abcdef-us11")?;
///
/// match client.get("/lists").await {
///     Ok(value) => println!("Success: {value:?}"),
///     Err(Error::Api(api_error)) => {
///         eprintln!("API rejected the call: {api_error}");
///     }
///     Err(Error::Deserialization { raw_response, serde_error, .. }) => {
///         eprintln!("Failed to deserialize. Raw response: {raw_response}");
///         eprintln!("Serde error: {serde_error}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid client configuration, such as a malformed API key.
    ///
    /// Fatal to construction; retrying with the same input cannot succeed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request body could not be serialized to JSON.
    ///
    /// Fails before any network I/O is performed.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// A network-level error occurred (connection failed, DNS lookup failed,
    /// timeout, TLS error, etc.).
    ///
    /// Wraps the underlying `reqwest::Error`. No retry is attempted.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body was not valid JSON.
    ///
    /// Preserves both the raw response text and the serde error message.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    Deserialization {
        /// The raw response body that failed to deserialize.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code of the response.
        status: StatusCode,
    },

    /// The combination of base endpoint and request path did not form a valid
    /// URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API reported failure via a non-2xx status.
    ///
    /// Carries the decoded [`ApiError`] record; if the error body was empty or
    /// unparseable, the record's fields are zero-valued.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    ///
    /// Returns `Some(status)` for `Api` and `Deserialization` errors, `None`
    /// for other error types. For `Api` errors this is the status reported in
    /// the response body, which is zero when the body was unparseable.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api_error) => StatusCode::from_u16(api_error.status).ok(),
            Error::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Deserialization { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Mailchimp API calls.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
