//! NetBox API client
//!
//! Implements the NetBox REST API client for the IPAM and DCIM operations the
//! helpers need. Based on NetBox API structure: /api/ipam/... and /api/dcim/...

use crate::common::query::query_resources;
use crate::common::{HttpClient, OneOrMany};
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport options for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Skip TLS certificate validation (self-signed NetBox deployments)
    pub accept_invalid_certs: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client with default options (30s timeout, certificates verified)
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_options(base_url, token, &ClientOptions::default())
    }

    /// Create a new NetBox client with explicit transport options
    pub fn with_options(base_url: String, token: String, options: &ClientOptions) -> Result<Self, NetBoxError> {
        if base_url.trim().is_empty() {
            return Err(NetBoxError::InvalidRequest("NetBox base URL is empty".to_string()));
        }

        let mut builder = Client::builder().timeout(options.timeout);
        if options.accept_invalid_certs {
            warn!("TLS certificate validation is disabled for NetBox at {}", base_url);
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// Uses the status endpoint as it's lightweight and requires authentication.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and NetBox is reachable
    /// * `Err(NetBoxError)` - Token is invalid or NetBox is unreachable
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _status: serde_json::Value = self.http.get("/api/status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    // ============================================================================
    // IPAM API Methods - Prefixes
    // ============================================================================

    /// Query prefixes by filters
    ///
    /// # Arguments
    /// * `filters` - Query parameters (e.g., [("prefix", "10.0.0.0/8"), ("vrf_id", "1")])
    /// * `fetch_all` - If true, fetch all pages (default: false, returns first page only)
    pub async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        query_resources(&self.http, "ipam/prefixes", filters, fetch_all).await
    }

    /// List the unused child blocks of a prefix
    ///
    /// NetBox returns a plain (unpaginated) list; its order is preserved.
    ///
    /// # Arguments
    /// * `prefix_id` - Parent prefix ID
    /// * `prefix_length` - Requested child length, passed as the `prefix_length` parameter
    pub async fn get_available_prefixes(&self, prefix_id: u64, prefix_length: u8) -> Result<Vec<AvailablePrefix>, NetBoxError> {
        debug!("Fetching available /{} prefixes from prefix {}", prefix_length, prefix_id);
        self.http
            .get(&format!(
                "/api/ipam/prefixes/{}/available-prefixes/?prefix_length={}",
                prefix_id, prefix_length
            ))
            .await
    }

    /// Allocate the next free child prefix of the requested length from a parent prefix
    ///
    /// # Returns
    /// * `Ok(Prefix)` - The created child prefix
    /// * `Err(NetBoxError)` - If NetBox rejects the allocation (e.g., no space left)
    pub async fn create_available_prefix(&self, prefix_id: u64, request: CreateChildPrefixRequest) -> Result<Prefix, NetBoxError> {
        debug!("Allocating /{} child prefix from prefix {}", request.prefix_length, prefix_id);
        let body = serde_json::to_value(&request)?;
        let created: OneOrMany<Prefix> = self.http
            .post(&format!("/api/ipam/prefixes/{}/available-prefixes/", prefix_id), &body)
            .await?;

        created
            .into_first()
            .ok_or_else(|| NetBoxError::Api(format!("No prefix was created in prefix {}", prefix_id)))
    }

    // ============================================================================
    // IPAM API Methods - IP Addresses
    // ============================================================================

    /// Create a new IP address
    ///
    /// # Arguments
    /// * `request` - Address in CIDR form plus status, tenant, VRF and assignment
    pub async fn create_ip_address(&self, request: CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        debug!("Creating IP address: {}", request.address);
        let body = serde_json::to_value(&request)?;
        self.http.post("/api/ipam/ip-addresses/", &body).await
    }

    /// Delete an IP address
    pub async fn delete_ip_address(&self, id: u64) -> Result<(), NetBoxError> {
        debug!("Deleting IP address {} from NetBox", id);
        self.http.delete(&format!("/api/ipam/ip-addresses/{}/", id)).await
    }

    // ============================================================================
    // IPAM API Methods - ASNs
    // ============================================================================

    /// Query ASNs by filters
    pub async fn query_asns(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Asn>, NetBoxError> {
        query_resources(&self.http, "ipam/asns", filters, fetch_all).await
    }

    // ============================================================================
    // DCIM API Methods - Devices
    // ============================================================================

    /// Get a device by ID
    ///
    /// # Returns
    /// * `Ok(Device)` - The device object
    /// * `Err(NetBoxError::NotFound)` - If no device has this ID
    pub async fn get_device(&self, id: u64) -> Result<Device, NetBoxError> {
        debug!("Fetching device {} from NetBox", id);
        self.http.get(&format!("/api/dcim/devices/{}/", id)).await
    }

    /// Update a device, sending only the fields set in `request`
    pub async fn update_device(&self, id: u64, request: UpdateDeviceRequest) -> Result<Device, NetBoxError> {
        debug!("Updating device {} in NetBox", id);
        let body = serde_json::to_value(&request)?;
        self.http.patch(&format!("/api/dcim/devices/{}/", id), &body).await
    }

    // ============================================================================
    // DCIM API Methods - Interfaces
    // ============================================================================

    /// Query interfaces by filters
    ///
    /// # Arguments
    /// * `filters` - Query parameters (e.g., [("device_id", "1"), ("name", "eth0")])
    /// * `fetch_all` - If true, fetch all pages (default: false, returns first page only)
    pub async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        query_resources(&self.http, "dcim/interfaces", filters, fetch_all).await
    }

    /// Create a new interface
    pub async fn create_interface(&self, request: CreateInterfaceRequest) -> Result<Interface, NetBoxError> {
        debug!("Creating interface {} on device {} in NetBox", request.name, request.device);
        let body = serde_json::to_value(&request)?;
        self.http.post("/api/dcim/interfaces/", &body).await
    }

    // ============================================================================
    // DCIM API Methods - Regions, Manufacturers, Device Types
    // ============================================================================

    /// Query regions
    pub async fn query_regions(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Region>, NetBoxError> {
        query_resources(&self.http, "dcim/regions", filters, fetch_all).await
    }

    /// Query manufacturers by filters
    pub async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        query_resources(&self.http, "dcim/manufacturers", filters, fetch_all).await
    }

    /// Get manufacturer by exact name
    pub async fn get_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, NetBoxError> {
        let manufacturers = self.query_manufacturers(&[("name", name)], false).await?;
        Ok(manufacturers.into_iter().find(|m| m.name == name))
    }

    /// Query device types by filters
    pub async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        query_resources(&self.http, "dcim/device-types", filters, fetch_all).await
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.validate_token().await
    }

    // IPAM Operations
    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        self.query_prefixes(filters, fetch_all).await
    }

    async fn get_available_prefixes(&self, prefix_id: u64, prefix_length: u8) -> Result<Vec<AvailablePrefix>, NetBoxError> {
        self.get_available_prefixes(prefix_id, prefix_length).await
    }

    async fn create_available_prefix(&self, prefix_id: u64, request: CreateChildPrefixRequest) -> Result<Prefix, NetBoxError> {
        self.create_available_prefix(prefix_id, request).await
    }

    async fn create_ip_address(&self, request: CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        self.create_ip_address(request).await
    }

    async fn delete_ip_address(&self, id: u64) -> Result<(), NetBoxError> {
        self.delete_ip_address(id).await
    }

    async fn query_asns(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Asn>, NetBoxError> {
        self.query_asns(filters, fetch_all).await
    }

    // DCIM Operations
    async fn get_device(&self, id: u64) -> Result<Device, NetBoxError> {
        self.get_device(id).await
    }

    async fn update_device(&self, id: u64, request: UpdateDeviceRequest) -> Result<Device, NetBoxError> {
        self.update_device(id, request).await
    }

    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        self.query_interfaces(filters, fetch_all).await
    }

    async fn create_interface(&self, request: CreateInterfaceRequest) -> Result<Interface, NetBoxError> {
        self.create_interface(request).await
    }

    async fn query_regions(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Region>, NetBoxError> {
        self.query_regions(filters, fetch_all).await
    }

    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        self.query_manufacturers(filters, fetch_all).await
    }

    async fn get_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, NetBoxError> {
        self.get_manufacturer_by_name(name).await
    }

    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        self.query_device_types(filters, fetch_all).await
    }
}
