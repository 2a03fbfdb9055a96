//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::error::NetBoxError;
use crate::models::*;

/// Trait for NetBox API client operations
///
/// Filters are passed straight through as query parameters, so they follow
/// NetBox's filterset names (`vrf_id`, `mask_length`, `contains`, ...).
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    // IPAM Operations
    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError>;
    async fn get_available_prefixes(&self, prefix_id: u64, prefix_length: u8) -> Result<Vec<AvailablePrefix>, NetBoxError>;
    async fn create_available_prefix(&self, prefix_id: u64, request: CreateChildPrefixRequest) -> Result<Prefix, NetBoxError>;
    async fn create_ip_address(&self, request: CreateIPAddressRequest) -> Result<IPAddress, NetBoxError>;
    async fn delete_ip_address(&self, id: u64) -> Result<(), NetBoxError>;
    async fn query_asns(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Asn>, NetBoxError>;

    // DCIM Operations
    async fn get_device(&self, id: u64) -> Result<Device, NetBoxError>;
    async fn update_device(&self, id: u64, request: UpdateDeviceRequest) -> Result<Device, NetBoxError>;
    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError>;
    async fn create_interface(&self, request: CreateInterfaceRequest) -> Result<Interface, NetBoxError>;
    async fn query_regions(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Region>, NetBoxError>;
    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError>;
    async fn get_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, NetBoxError>;
    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError>;
}
