//! Mailchimp API client and the request pipeline every call flows through.
//!
//! The [`Client`] type is the main entry point. Use [`Client::new`] for the
//! common case or [`ClientBuilder`] to inject a pre-configured transport.

use crate::{auth::ApiKey, ApiError, Error, Result};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use url::Url;

/// Returns the process-wide default transport, created on first use.
///
/// Injecting a transport through [`ClientBuilder::http_client`] bypasses this
/// instance entirely; it exists so that clients built without one share a
/// single connection pool.
fn default_transport() -> &'static reqwest::Client {
    static TRANSPORT: OnceLock<reqwest::Client> = OnceLock::new();
    TRANSPORT.get_or_init(reqwest::Client::new)
}

/// An async client for the Mailchimp Marketing API v3.0.
///
/// The client is cheap to clone and safe to share across tasks: its
/// configuration (API key, derived regional endpoint, transport handle) is
/// immutable after construction, and concurrent [`execute`](Client::execute)
/// calls never touch shared mutable state.
///
/// Every call is authenticated with HTTP Basic auth (empty username, full API
/// key as the password) and addressed relative to the regional base endpoint
/// derived from the key's datacenter suffix. No retries, timeouts, or caching
/// happen at this layer; deadlines belong to the transport or the caller.
///
/// # Examples
///
/// ```no_run
/// use mailchimp::Client;
///
/// # async fn example() -> Result<(), mailchimp::Error> {
/// let client = Client::new("0123456789abcdef-us11")?;
///
/// // Fetch account-level metadata.
/// let root = client.get("/").await?;
/// println!("Account: {:?}", root.get("account_name"));
///
/// // Subscribe a contact to a list.
/// let member = client.subscribe("alice@example.com", "4ca5becb8d").await?;
/// println!("Member: {member:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    api_key: ApiKey,
    base_url: Url,
}

impl Client {
    /// Creates a client from an API key, using the shared default transport.
    ///
    /// The key must be formatted like `xyz-us11`; its datacenter suffix
    /// selects the regional endpoint (`https://us11.api.mailchimp.com/3.0`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key is malformed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new [`ClientBuilder`] for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mailchimp::Client;
    ///
    /// # fn example() -> Result<(), mailchimp::Error> {
    /// let client = Client::builder()
    ///     .api_key("0123456789abcdef-us11")
    ///     .http_client(reqwest::Client::new())
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the base endpoint all request paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the datacenter token the client is routed to, e.g. `us11`.
    pub fn datacenter(&self) -> &str {
        self.inner.api_key.datacenter()
    }

    /// Executes a single API call and returns the decoded JSON response.
    ///
    /// This is the pipeline every request flows through: the body (if any) is
    /// serialized before any I/O, the URL is formed by appending `path`
    /// verbatim to the base endpoint (no slash normalization, so callers
    /// supply a leading `/`), Basic auth is attached, and the response body is
    /// fully read on every path before classification.
    ///
    /// A 2xx response decodes into a generic [`serde_json::Value`]. Any other
    /// status decodes the body into an [`ApiError`] and returns it as
    /// [`Error::Api`]; if the error body is empty or not JSON, a zero-valued
    /// record is returned instead so the HTTP failure is never masked.
    ///
    /// Calling this twice issues two requests; nothing is retried or cached.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use http::Method;
    /// use mailchimp::Client;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), mailchimp::Error> {
    /// let client = Client::new("0123456789abcdef-us11")?;
    ///
    /// let body = json!({"name": "Newsletter"});
    /// let created = client
    ///     .execute(Method::POST, "/lists", Some(&body))
    ///     .await?;
    /// println!("Created list: {:?}", created.get("id"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        // Serialize before building the request so an unencodable body never
        // reaches the wire.
        let json_body = match body {
            Some(body) => Some(
                serde_json::to_value(body).map_err(|e| Error::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        // Verbatim concatenation: the fixed /3.0 segment must survive, so no
        // Url::join here.
        let url = Url::parse(&format!("{}{}", self.inner.base_url, path))?;

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing API request"
        );

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .basic_auth("", Some(self.inner.api_key.as_str()));

        if let Some(json_body) = &json_body {
            request = request.json(json_body);
        }

        let response = request.send().await?;
        self.classify_response(response).await
    }

    /// Reads the full response body and classifies the outcome by status code.
    async fn classify_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        tracing::info!(status = status.as_u16(), "Received API response");

        if !status.is_success() {
            // Drain the body even when it turns out to be unusable.
            let raw_response = response.text().await.unwrap_or_default();

            let api_error = match serde_json::from_str::<ApiError>(&raw_response) {
                Ok(api_error) => api_error,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Error body was not a problem document; reporting zero-valued record"
                    );
                    ApiError::default()
                }
            };

            tracing::error!(
                status = status.as_u16(),
                title = %api_error.title,
                "API reported failure"
            );

            return Err(Error::Api(api_error));
        }

        let raw_body = response.text().await?;

        match serde_json::from_str::<Value>(&raw_body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize successful response"
                );

                Err(Error::Deserialization {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }

    /// Makes a GET request to the specified path.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute::<()>(Method::GET, path, None).await
    }

    /// Makes a POST request to the specified path with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Makes a PUT request to the specified path with a JSON body.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Makes a PATCH request to the specified path with a JSON body.
    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request to the specified path.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute::<()>(Method::DELETE, path, None).await
    }

    /// Subscribes an email address to a list.
    ///
    /// Posts `{"email_address": .., "status": "subscribed"}` to
    /// `/lists/<list_id>/members/` and returns the member record the API
    /// echoes back.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mailchimp::Client;
    ///
    /// # async fn example() -> Result<(), mailchimp::Error> {
    /// let client = Client::new("0123456789abcdef-us11")?;
    /// let member = client.subscribe("alice@example.com", "4ca5becb8d").await?;
    /// assert_eq!(
    ///     member.get("status").and_then(|s| s.as_str()),
    ///     Some("subscribed")
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub async fn subscribe(&self, email: &str, list_id: &str) -> Result<Value> {
        let body = serde_json::json!({
            "email_address": email,
            "status": "subscribed",
        });
        self.post(&format!("/lists/{list_id}/members/"), &body).await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use mailchimp::ClientBuilder;
///
/// # fn example() -> Result<(), mailchimp::Error> {
/// let client = ClientBuilder::new()
///     .api_key("0123456789abcdef-us11")
///     .http_client(reqwest::Client::new())
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    http_client: Option<reqwest::Client>,
    base_url: Option<Url>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            http_client: None,
            base_url: None,
        }
    }

    /// Sets the API key. Required.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the base endpoint derived from the API key's datacenter.
    ///
    /// Intended for pointing the client at a local mock server or a
    /// nonstandard deployment; production clients normally let the key's
    /// datacenter suffix pick the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the transport to send requests through.
    ///
    /// `reqwest::Client` is internally reference-counted, so passing a clone
    /// of a client the application already owns shares its connection pool.
    /// When no transport is supplied, a process-wide default instance is used.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// The API key is validated here and the regional base endpoint is derived
    /// from its datacenter suffix. No network I/O occurs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no API key was provided or it is
    /// malformed.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Configuration("API key is required".to_string()))?;
        let api_key = ApiKey::parse(api_key)?;

        let http_client = self
            .http_client
            .unwrap_or_else(|| default_transport().clone());

        let base_url = match self.base_url {
            Some(base_url) => base_url,
            None => api_key.base_endpoint().clone(),
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                api_key,
                base_url,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
