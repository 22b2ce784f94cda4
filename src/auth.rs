//! API key parsing and regional endpoint derivation.
//!
//! Mailchimp API keys carry their datacenter as a suffix (`xyz-us11`). The
//! [`ApiKey`] type validates that shape once at construction and derives the
//! regional base endpoint from it, so the rest of the crate never has to
//! re-validate the credential.

use crate::{Error, Result};
use url::Url;

/// A validated Mailchimp API key.
///
/// Keys must be formatted like `<key>-<dc>`, where `<dc>` is the datacenter
/// token (e.g. `us11`) identifying the regional API host. Both parts must be
/// non-empty and exactly one `-` separator is allowed.
///
/// # Examples
///
/// ```
/// use mailchimp::ApiKey;
///
/// let key = ApiKey::parse("0123456789abcdef-us11").unwrap();
/// assert_eq!(key.datacenter(), "us11");
/// assert_eq!(
///     key.base_endpoint().as_str(),
///     "https://us11.api.mailchimp.com/3.0"
/// );
///
/// assert!(ApiKey::parse("no-separator-here").is_err());
/// assert!(ApiKey::parse("missing_datacenter").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
    datacenter_offset: usize,
    endpoint: Url,
}

impl ApiKey {
    /// Parses and validates an API key string, deriving the regional base
    /// endpoint `https://<dc>.api.mailchimp.com/3.0` from its datacenter
    /// suffix. No network I/O is performed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key does not split into exactly
    /// two non-empty parts on a single `-`, or [`Error::InvalidUrl`] if the
    /// datacenter token cannot form a valid host.
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let parts: Vec<&str> = key.split('-').collect();
        let (k, dc) = match parts.as_slice() {
            [k, dc] if !k.is_empty() && !dc.is_empty() => (*k, *dc),
            _ => {
                return Err(Error::Configuration(
                    "Mailchimp API key must be formatted like: <key>-<dc> (e.g. xyz-us11)"
                        .to_string(),
                ))
            }
        };
        let endpoint = Url::parse(&format!("https://{dc}.api.mailchimp.com/3.0"))?;
        Ok(Self {
            datacenter_offset: k.len() + 1,
            key,
            endpoint,
        })
    }

    /// Returns the full key string, as sent in the Basic auth password field.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the datacenter token, e.g. `us11`.
    pub fn datacenter(&self) -> &str {
        &self.key[self.datacenter_offset..]
    }

    /// Returns the regional base endpoint derived from this key.
    pub fn base_endpoint(&self) -> &Url {
        &self.endpoint
    }
}
