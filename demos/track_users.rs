//! Track and delete users
//!
//! Usage:
//!   BRAZE_API_KEY=... cargo run --example track_users
//!
//! Set `RUST_LOG=braze_client=debug` to watch retry decisions.

use braze_client::{BrazeClient, Records};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("BRAZE_API_KEY").unwrap_or_else(|_| "YOUR_API_KEY".to_string());
    let client = BrazeClient::new(api_key)?;

    // Create or update users; events and purchases are left out of the payload.
    let attributes = Records::try_from(json!([{
        "external_id": "1",
        "first_name": "First name",
        "last_name": "Last name",
        "email": "email@example.com",
        "status": "Active",
    }]))?;
    let r = client.track(Some(attributes), None, None);
    if r.success {
        println!("Success! {}", serde_json::to_string_pretty(&r)?);
    } else {
        println!("track failed (HTTP {}): {:?}", r.status_code, r.errors);
    }

    // Delete users by external_id.
    let r = client.delete(Some(vec!["1".to_string()]), None);
    if r.success {
        println!("Success! {}", serde_json::to_string_pretty(&r)?);
    } else {
        println!("delete failed (HTTP {}): {:?}", r.status_code, r.errors);
    }

    Ok(())
}
