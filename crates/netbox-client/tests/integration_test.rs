//! Integration tests for NetBox client
//!
//! These tests require a running NetBox instance.
//! Set NETBOX_URL and NETBOX_TOKEN environment variables to run.

use netbox_client::NetBoxClient;

fn live_client() -> NetBoxClient {
    let url = std::env::var("NETBOX_URL")
        .unwrap_or_else(|_| "http://localhost:8001".to_string());
    let token = std::env::var("NETBOX_TOKEN")
        .expect("NETBOX_TOKEN environment variable must be set");

    NetBoxClient::new(url, token).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_validate_token() {
    let client = live_client();
    assert!(client.validate_token().await.is_ok(), "Token validation failed");
}

#[tokio::test]
#[ignore]
async fn test_query_prefixes() {
    let client = live_client();

    let prefixes = client.query_prefixes(&[], false).await
        .expect("Failed to query prefixes");

    println!("Found {} prefixes", prefixes.len());
}

#[tokio::test]
#[ignore]
async fn test_query_asns_all_pages() {
    let client = live_client();

    let asns = client.query_asns(&[], true).await
        .expect("Failed to query ASNs");

    println!("Found {} ASNs", asns.len());
}

#[tokio::test]
#[ignore]
async fn test_query_regions_and_manufacturers() {
    let client = live_client();

    let regions = client.query_regions(&[], true).await
        .expect("Failed to query regions");
    let manufacturers = client.query_manufacturers(&[], true).await
        .expect("Failed to query manufacturers");

    println!("Found {} regions and {} manufacturers", regions.len(), manufacturers.len());
}
