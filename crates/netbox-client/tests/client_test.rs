#![allow(clippy::unwrap_used)]
// HTTP-level tests for `NetBoxClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netbox_client::{
    CreateChildPrefixRequest, CreateIPAddressRequest, CreateInterfaceRequest, IPAddressStatus,
    NetBoxClient, NetBoxError, UpdateDeviceRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NetBoxClient) {
    let server = MockServer::start().await;
    let client = NetBoxClient::new(server.uri(), "test-token".to_string()).unwrap();
    (server, client)
}

fn page(results: serde_json::Value) -> serde_json::Value {
    let count = results.as_array().map_or(0, Vec::len);
    json!({ "count": count, "next": null, "previous": null, "results": results })
}

// ── Construction & auth ─────────────────────────────────────────────

#[test]
fn test_empty_base_url_is_rejected() {
    let result = NetBoxClient::new("  ".to_string(), "token".to_string());
    assert!(matches!(result, Err(NetBoxError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_validate_token_sends_token_header() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .and(header("Authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "netbox-version": "4.1.0" })))
        .expect(1)
        .mount(&server)
        .await;

    client.validate_token().await.unwrap();
}

#[tokio::test]
async fn test_invalid_token_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"detail\": \"Invalid token\"}"))
        .mount(&server)
        .await;

    let result = client.validate_token().await;
    assert!(
        matches!(result, Err(NetBoxError::Authentication(_))),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Prefixes ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_query_prefixes_passes_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/prefixes/"))
        .and(query_param("contains", "10.1.2.5"))
        .and(query_param("mask_length", "29"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([{
            "id": 7,
            "url": "http://netbox/api/ipam/prefixes/7/",
            "display": "10.1.2.0/29",
            "prefix": "10.1.2.0/29",
            "vrf": { "id": 3, "name": "mgmt" },
            "tenant": null,
            "status": { "value": "active", "label": "Active" }
        }]))))
        .mount(&server)
        .await;

    let prefixes = client
        .query_prefixes(&[("contains", "10.1.2.5"), ("mask_length", "29")], false)
        .await
        .unwrap();

    assert_eq!(prefixes.len(), 1);
    assert_eq!(prefixes[0].prefix, "10.1.2.0/29");
    assert_eq!(prefixes[0].mask_length(), Some(29));
    assert_eq!(prefixes[0].vrf.as_ref().map(|v| v.id), Some(3));
}

#[tokio::test]
async fn test_fetch_all_follows_next_links() {
    let (server, client) = setup().await;
    let next = format!("{}/api/dcim/regions/?limit=1&offset=1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/dcim/regions/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": null, "previous": null,
            "results": [{ "id": 2, "name": "emea" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/regions/"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2, "next": next, "previous": null,
            "results": [{ "id": 1, "name": "amer" }]
        })))
        .mount(&server)
        .await;

    let regions = client.query_regions(&[], true).await.unwrap();
    let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["amer", "emea"]);
}

#[tokio::test]
async fn test_available_prefixes_keep_service_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/prefixes/4/available-prefixes/"))
        .and(query_param("prefix_length", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "family": 4, "prefix": "10.0.9.0/24", "vrf": null },
            { "family": 4, "prefix": "10.0.2.0/23", "vrf": null }
        ])))
        .mount(&server)
        .await;

    let available = client.get_available_prefixes(4, 24).await.unwrap();
    assert_eq!(available[0].prefix, "10.0.9.0/24");
    assert_eq!(available[1].prefix, "10.0.2.0/23");
}

#[tokio::test]
async fn test_create_available_prefix_accepts_list_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/ipam/prefixes/4/available-prefixes/"))
        .and(body_json(json!({
            "prefix_length": 26,
            "tenant": 2,
            "site": 5,
            "vrf": 1,
            "description": "rack 12",
            "role": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": 99, "prefix": "10.0.0.64/26", "description": "rack 12" }
        ])))
        .mount(&server)
        .await;

    let request = CreateChildPrefixRequest {
        prefix_length: 26,
        tenant: Some(2),
        site: Some(5),
        vrf: Some(1),
        description: "rack 12".to_string(),
        role: None,
    };
    let prefix = client.create_available_prefix(4, request).await.unwrap();
    assert_eq!(prefix.id, 99);
    assert_eq!(prefix.prefix, "10.0.0.64/26");
}

// ── Devices & interfaces ────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/404/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"detail\": \"No Device matches the given query.\"}"))
        .mount(&server)
        .await;

    let result = client.get_device(404).await;
    assert!(matches!(result, Err(NetBoxError::NotFound(_))), "got: {result:?}");
}

#[tokio::test]
async fn test_create_interface_validation_error_keeps_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dcim/interfaces/"))
        .and(body_json(json!({
            "device": 12,
            "name": "eth0",
            "type": "virtual",
            "enabled": true
        })))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            "{\"type\": [\"\\\"bogus\\\" is not a valid choice.\"]}",
        ))
        .mount(&server)
        .await;

    let request = CreateInterfaceRequest {
        device: 12,
        name: "eth0".to_string(),
        interface_type: "virtual".to_string(),
        enabled: true,
        description: None,
    };
    match client.create_interface(request).await {
        Err(NetBoxError::Validation(detail)) => assert!(detail.contains("not a valid choice")),
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_device_patches_primary_ip4() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/dcim/devices/12/"))
        .and(body_json(json!({ "primary_ip4": 55 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "edge-01",
            "primary_ip4": { "id": 55, "address": "10.1.2.5/29" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateDeviceRequest { primary_ip4: Some(55) };
    let device = client.update_device(12, request).await.unwrap();
    assert_eq!(device.primary_ip4.map(|ip| ip.id), Some(55));
}

// ── IP addresses ────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_ip_address_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/ipam/ip-addresses/"))
        .and(body_json(json!({
            "address": "10.1.2.5/29",
            "status": "active",
            "tenant": null,
            "vrf": 3,
            "assigned_object_type": "dcim.interface",
            "assigned_object_id": 77
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 55,
            "address": "10.1.2.5/29",
            "status": { "value": "active", "label": "Active" },
            "assigned_object_type": "dcim.interface",
            "assigned_object_id": 77
        })))
        .mount(&server)
        .await;

    let request = CreateIPAddressRequest {
        address: "10.1.2.5/29".to_string(),
        status: IPAddressStatus::Active,
        tenant: None,
        vrf: Some(3),
        assigned_object_type: Some("dcim.interface".to_string()),
        assigned_object_id: Some(77),
        description: None,
        tags: None,
    };
    let ip = client.create_ip_address(request).await.unwrap();
    assert_eq!(ip.id, 55);
    assert_eq!(ip.status.map(|s| s.value), Some(IPAddressStatus::Active));
}

#[tokio::test]
async fn test_delete_ip_address_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/ipam/ip-addresses/55/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_ip_address(55).await.unwrap();
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/asns/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.query_asns(&[], true).await;
    assert!(matches!(result, Err(NetBoxError::Api(_))), "got: {result:?}");
}
