//! Batch operations: queue many independent API calls and submit them as one
//! request.
//!
//! A [`Batch`] is an append-only, ordered list of [`Operation`]s. Submitting
//! it sends a single `POST /batches` through the same request pipeline as any
//! other call; the remote side executes the operations and reports
//! per-operation outcomes on its own schedule. This crate does not poll for
//! batch completion.

use crate::{Client, Error, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logical API call eligible for batching.
///
/// Wire shape: `{"method": string, "path": string, "body": any}`. No
/// validation happens at this layer; the remote side judges methods, paths,
/// and bodies when the batch runs.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mailchimp::Operation;
/// use serde_json::json;
///
/// let op = Operation::new(
///     Method::POST,
///     "/lists/4ca5becb8d/members/",
///     Some(json!({"email_address": "alice@example.com", "status": "subscribed"})),
/// );
/// assert_eq!(op.method, "POST");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The HTTP method, uppercased (`GET`, `POST`, ...).
    pub method: String,
    /// The request path, relative to the API version root.
    pub path: String,
    /// The JSON body, or `null` for body-less calls.
    pub body: Option<Value>,
}

impl Operation {
    /// Creates a new operation.
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: method.as_str().to_string(),
            path: path.into(),
            body,
        }
    }
}

/// An ordered collection of operations submitted as a single request.
///
/// Insertion order is significant: it defines the execution order the remote
/// side reports. Operations are only ever appended; nothing is removed or
/// reordered. A `Batch` is not safe for concurrent mutation; wrap it in a
/// mutex if multiple tasks append to the same batch.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use mailchimp::{Batch, Operation};
/// use serde_json::json;
///
/// let mut batch = Batch::new();
/// batch.add_operation(Operation::new(
///     Method::POST,
///     "/lists/4ca5becb8d/members/",
///     Some(json!({"email_address": "alice@example.com", "status": "subscribed"})),
/// ));
/// batch.add_operation(Operation::new(Method::GET, "/lists", None));
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    operations: Vec<Operation>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the end of the batch. Never fails.
    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Returns the queued operations in insertion order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the number of queued operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if no operations have been queued.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Encodes the batch into the submission envelope.
    ///
    /// The operations array is JSON-encoded to a string and embedded as the
    /// value of the single `operations` field:
    /// `{"operations": "[{\"method\":...}]"}`. The double encoding is the wire
    /// contract the remote side expects; do not flatten it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the operation list cannot be
    /// encoded. No I/O is performed.
    pub fn to_envelope(&self) -> Result<Value> {
        let encoded =
            serde_json::to_string(&self.operations).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(serde_json::json!({ "operations": encoded }))
    }
}

/// The acknowledgment returned by the API after accepting a batch.
///
/// Only the identifier and status are modeled as fields; everything else the
/// remote contract defines (operation counts, timestamps, result links) rides
/// along in `extra` and round-trips opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Opaque identifier assigned to the accepted batch.
    #[serde(default)]
    pub id: String,
    /// Processing status reported at submission time, e.g. `pending`.
    #[serde(default)]
    pub status: String,
    /// All remaining response fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Client {
    /// Submits a batch of operations as a single request.
    ///
    /// Encodes the batch envelope and sends `POST /batches` through the
    /// request pipeline. On success the acknowledgment is decoded into a
    /// [`BatchResponse`]; pipeline failures propagate unchanged. Per-operation
    /// outcomes are determined by the remote side later and are not polled for
    /// here.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use http::Method;
    /// use mailchimp::{Batch, Client, Operation};
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), mailchimp::Error> {
    /// let client = Client::new("0123456789abcdef-us11")?;
    ///
    /// let mut batch = Batch::new();
    /// for email in ["alice@example.com", "bob@example.com"] {
    ///     batch.add_operation(Operation::new(
    ///         Method::POST,
    ///         "/lists/4ca5becb8d/members/",
    ///         Some(json!({"email_address": email, "status": "subscribed"})),
    ///     ));
    /// }
    ///
    /// let handle = client.submit_batch(&batch).await?;
    /// println!("Batch {} is {}", handle.id, handle.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_batch(&self, batch: &Batch) -> Result<BatchResponse> {
        let envelope = batch.to_envelope()?;
        let value = self.post("/batches", &envelope).await?;

        serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            raw_response: value.to_string(),
            serde_error: e.to_string(),
            status: http::StatusCode::OK,
        })
    }
}
