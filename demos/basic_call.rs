//! Basic example demonstrating single API calls.
//!
//! This example shows how to:
//! - Create a client from an API key
//! - Make a raw GET request through the pipeline
//! - Subscribe a contact to a list
//! - Match on the error taxonomy
//!
//! Run with: `MAILCHIMP_API_KEY=xyz-us11 cargo run --example basic_call`

use mailchimp::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("mailchimp=debug,basic_call=info")
        .init();

    let api_key = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MAILCHIMP_API_KEY").ok())
        .unwrap_or_else(|| "0123456789abcdef-us11".to_string());

    // The datacenter suffix of the key picks the regional endpoint.
    let client = Client::new(api_key)?;
    println!("Routed to datacenter: {}", client.datacenter());
    println!("Base endpoint: {}", client.base_url());
    println!();

    println!("=== Raw GET Request ===");
    match client.get("/lists").await {
        Ok(lists) => {
            println!("Lists: {lists:#?}");
        }
        Err(Error::Api(api_error)) => {
            // A key for a demo account typically lands here with a 401.
            println!("API rejected the call: {api_error}");
        }
        Err(e) => {
            println!("Call failed before reaching the API: {e}");
        }
    }
    println!();

    println!("=== Subscribe a Contact ===");
    match client.subscribe("alice@example.com", "4ca5becb8d").await {
        Ok(member) => {
            println!("Subscribed: {:?}", member.get("email_address"));
            println!("Status: {:?}", member.get("status"));
        }
        Err(Error::Api(api_error)) => {
            println!("API rejected the call: {api_error}");
            println!("  type:   {}", api_error.kind);
            println!("  status: {}", api_error.status);
            println!("  detail: {}", api_error.detail);
        }
        Err(e) => {
            println!("Call failed before reaching the API: {e}");
        }
    }

    Ok(())
}
