//! Example demonstrating batch submission.
//!
//! This example shows how to:
//! - Queue several independent operations into a batch
//! - Inspect the wire envelope before submitting
//! - Submit the batch as a single request and read the handle
//!
//! Run with: `MAILCHIMP_API_KEY=xyz-us11 cargo run --example batch_submit`

use http::Method;
use mailchimp::{Batch, Client, Error, Operation};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("mailchimp=debug,batch_submit=info")
        .init();

    let api_key = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MAILCHIMP_API_KEY").ok())
        .unwrap_or_else(|| "0123456789abcdef-us11".to_string());

    let client = Client::new(api_key)?;
    let list_id = "4ca5becb8d";

    println!("=== Building a Batch ===");
    let mut batch = Batch::new();
    for email in ["alice@example.com", "bob@example.com", "carol@example.com"] {
        batch.add_operation(Operation::new(
            Method::POST,
            format!("/lists/{list_id}/members/"),
            Some(json!({"email_address": email, "status": "subscribed"})),
        ));
    }
    batch.add_operation(Operation::new(Method::GET, format!("/lists/{list_id}"), None));
    println!("Queued {} operations", batch.len());

    // The operations array travels JSON-encoded as a string inside the
    // envelope. This is the wire contract, visible here:
    println!("Envelope: {}", batch.to_envelope()?);
    println!();

    println!("=== Submitting ===");
    match client.submit_batch(&batch).await {
        Ok(handle) => {
            println!("Batch accepted");
            println!("  id:     {}", handle.id);
            println!("  status: {}", handle.status);
            for (field, value) in &handle.extra {
                println!("  {field}: {value}");
            }
        }
        Err(Error::Api(api_error)) => {
            println!("API rejected the batch: {api_error}");
        }
        Err(e) => {
            println!("Submission failed before reaching the API: {e}");
        }
    }

    Ok(())
}
