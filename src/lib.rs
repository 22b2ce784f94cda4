//! # Mailchimp - an async client for the Mailchimp Marketing API
//!
//! This crate is a thin, predictable client for the Mailchimp Marketing API
//! v3.0, built on top of `reqwest`. It handles authentication, regional
//! endpoint routing, JSON payload handling, and normalizes transport and API
//! failures into a single error type. Independent calls can be queued into a
//! [`Batch`] and submitted as one request.
//!
//! ## Quick Start
//!
//! ```no_run
//! use http::Method;
//! use mailchimp::{Batch, Client, Operation};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailchimp::Error> {
//!     // The key's datacenter suffix (us11) selects the regional endpoint.
//!     let client = Client::new("0123456789abcdef-us11")?;
//!
//!     // Single call: subscribe a contact to a list.
//!     let member = client.subscribe("alice@example.com", "4ca5becb8d").await?;
//!     println!("Subscribed: {:?}", member.get("email_address"));
//!
//!     // Raw call through the same pipeline.
//!     let lists = client.get("/lists").await?;
//!     println!("Lists: {lists:?}");
//!
//!     // Batch: queue independent calls and submit them together.
//!     let mut batch = Batch::new();
//!     for email in ["bob@example.com", "carol@example.com"] {
//!         batch.add_operation(Operation::new(
//!             Method::POST,
//!             "/lists/4ca5becb8d/members/",
//!             Some(json!({"email_address": email, "status": "subscribed"})),
//!         ));
//!     }
//!     let handle = client.submit_batch(&batch).await?;
//!     println!("Batch {} accepted, status: {}", handle.id, handle.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure mode comes back as one [`Error`] value; nothing is logged
//! instead of returned, nothing is retried internally:
//!
//! ```no_run
//! use mailchimp::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("0123456789abcdef-us11")?;
//! match client.get("/lists/does-not-exist").await {
//!     Ok(value) => println!("Success: {value:?}"),
//!     Err(Error::Api(api_error)) => {
//!         // Rendered as "Error 404 Resource Not Found (...)"
//!         eprintln!("API error: {api_error}");
//!         eprintln!("  status: {}", api_error.status);
//!     }
//!     Err(Error::Transport(e)) => eprintln!("Network failure: {e}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! - **One pipeline** - every call, batched or not, flows through
//!   [`Client::execute`]: body encoding, URL construction, Basic auth,
//!   status classification, error extraction.
//! - **No hidden behavior** - no retries, no backoff, no rate limiting, no
//!   pagination, no caching. Callers decide how to react to failures.
//! - **Shared, injectable transport** - a process-wide default
//!   `reqwest::Client` is used unless one is supplied, so tests can
//!   substitute a mock server and applications can share a connection pool.
//! - **Concurrency** - a [`Client`] is immutable after construction and safe
//!   to share; a [`Batch`] under construction is not, and needs external
//!   synchronization if appended to from multiple tasks.

mod auth;
mod batch;
mod client;
mod error;

pub use auth::ApiKey;
pub use batch::{Batch, BatchResponse, Operation};
pub use client::{Client, ClientBuilder};
pub use error::{ApiError, Error, Result};
