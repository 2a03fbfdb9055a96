//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! The mock is organized into domain-specific modules:
//! - `ipam.rs` - IPAM operations (prefixes, available prefixes, IP addresses, ASNs)
//! - `dcim.rs` - DCIM operations (devices, interfaces, regions, manufacturers, device types)
//! - `helpers.rs` - Fixture builders, nested types and CIDR matching
//!
//! Stores are ordered maps keyed by ID, so list operations return records in
//! ascending ID order the way NetBox's default ordering does for these tests.

mod dcim;
mod helpers;
mod ipam;

pub use helpers::Helpers;

use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Failure the mock raises instead of performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectedFailure {
    /// NetBox rejected the body (HTTP 400)
    Validation(String),
    /// Token rejected (HTTP 401/403)
    Authentication(String),
    /// Any other non-success status
    Api(String),
}

impl InjectedFailure {
    fn to_error(&self) -> NetBoxError {
        match self {
            InjectedFailure::Validation(detail) => NetBoxError::Validation(detail.clone()),
            InjectedFailure::Authentication(detail) => NetBoxError::Authentication(detail.clone()),
            InjectedFailure::Api(detail) => NetBoxError::Api(detail.clone()),
        }
    }
}

/// Mock NetBoxClient for testing
///
/// This mock stores resources in memory and can be configured to fail specific
/// operations. Clones share the same stores, so a test can hand one clone to
/// the code under test and inspect state through another.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) prefixes: Arc<Mutex<BTreeMap<u64, Prefix>>>,
    pub(crate) available_prefixes: Arc<Mutex<HashMap<u64, Vec<AvailablePrefix>>>>,
    pub(crate) ip_addresses: Arc<Mutex<BTreeMap<u64, IPAddress>>>,
    pub(crate) asns: Arc<Mutex<BTreeMap<u64, Asn>>>,
    pub(crate) devices: Arc<Mutex<BTreeMap<u64, Device>>>,
    pub(crate) interfaces: Arc<Mutex<BTreeMap<u64, Interface>>>,
    pub(crate) regions: Arc<Mutex<BTreeMap<u64, Region>>>,
    pub(crate) manufacturers: Arc<Mutex<BTreeMap<u64, Manufacturer>>>,
    pub(crate) device_types: Arc<Mutex<BTreeMap<u64, DeviceType>>>,
    // Behaviour and bookkeeping
    pub(crate) failures: Arc<Mutex<HashMap<String, InjectedFailure>>>,
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
    pub(crate) prefix_queries: Arc<Mutex<Vec<Vec<(String, String)>>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

/// Lock a store, recovering the data if a panicking test poisoned it
pub(crate) fn lock<T>(store: &Mutex<T>) -> MutexGuard<'_, T> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            prefixes: Arc::default(),
            available_prefixes: Arc::default(),
            ip_addresses: Arc::default(),
            asns: Arc::default(),
            devices: Arc::default(),
            interfaces: Arc::default(),
            regions: Arc::default(),
            manufacturers: Arc::default(),
            device_types: Arc::default(),
            failures: Arc::default(),
            calls: Arc::default(),
            prefix_queries: Arc::default(),
            // Seeded fixtures usually take small IDs; generated ones start well above them
            next_id: Arc::new(Mutex::new(1000)),
        }
    }

    /// Fixture builders bound to this mock's base URL
    pub fn helpers(&self) -> Helpers {
        Helpers::new(self.base_url.clone())
    }

    /// Add a prefix to the mock store (for test setup)
    pub fn add_prefix(&self, prefix: Prefix) {
        lock(&self.prefixes).insert(prefix.id, prefix);
    }

    /// Set the available child prefixes reported for a parent prefix (for test setup)
    pub fn set_available_prefixes(&self, prefix_id: u64, available: Vec<AvailablePrefix>) {
        lock(&self.available_prefixes).insert(prefix_id, available);
    }

    /// Add an IP address to the mock store (for test setup)
    pub fn add_ip_address(&self, ip: IPAddress) {
        lock(&self.ip_addresses).insert(ip.id, ip);
    }

    /// Add an ASN to the mock store (for test setup)
    pub fn add_asn(&self, asn: Asn) {
        lock(&self.asns).insert(asn.id, asn);
    }

    /// Add a device to the mock store (for test setup)
    pub fn add_device(&self, device: Device) {
        lock(&self.devices).insert(device.id, device);
    }

    /// Add an interface to the mock store (for test setup)
    pub fn add_interface(&self, interface: Interface) {
        lock(&self.interfaces).insert(interface.id, interface);
    }

    /// Add a region to the mock store (for test setup)
    pub fn add_region(&self, region: Region) {
        lock(&self.regions).insert(region.id, region);
    }

    /// Add a manufacturer to the mock store (for test setup)
    pub fn add_manufacturer(&self, manufacturer: Manufacturer) {
        lock(&self.manufacturers).insert(manufacturer.id, manufacturer);
    }

    /// Add a device type to the mock store (for test setup)
    pub fn add_device_type(&self, device_type: DeviceType) {
        lock(&self.device_types).insert(device_type.id, device_type);
    }

    /// Make every later call of `operation` (a trait method name) fail
    pub fn fail_on(&self, operation: &str, failure: InjectedFailure) {
        lock(&self.failures).insert(operation.to_string(), failure);
    }

    /// Names of the trait methods invoked so far, in call order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// How many times `operation` was invoked
    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.as_str() == operation).count()
    }

    /// Filters of every `query_prefixes` call, in call order
    pub fn prefix_queries(&self) -> Vec<Vec<(String, String)>> {
        lock(&self.prefix_queries).clone()
    }

    /// Snapshot of stored IP addresses
    pub fn ip_addresses(&self) -> Vec<IPAddress> {
        lock(&self.ip_addresses).values().cloned().collect()
    }

    /// Snapshot of stored interfaces
    pub fn interfaces(&self) -> Vec<Interface> {
        lock(&self.interfaces).values().cloned().collect()
    }

    /// Snapshot of stored prefixes
    pub fn prefixes(&self) -> Vec<Prefix> {
        lock(&self.prefixes).values().cloned().collect()
    }

    /// Current state of a stored device
    pub fn device(&self, id: u64) -> Option<Device> {
        lock(&self.devices).get(&id).cloned()
    }

    /// Record the call and return the injected failure for it, if any
    pub(crate) fn enter(&self, operation: &str) -> Result<(), NetBoxError> {
        lock(&self.calls).push(operation.to_string());
        match lock(&self.failures).get(operation) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = lock(&self.next_id);
        let current = *id;
        *id += 1;
        current
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.enter("validate_token")
    }

    // IPAM Operations - delegated to ipam module
    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        ipam::query_prefixes(self, filters, fetch_all).await
    }

    async fn get_available_prefixes(&self, prefix_id: u64, prefix_length: u8) -> Result<Vec<AvailablePrefix>, NetBoxError> {
        ipam::get_available_prefixes(self, prefix_id, prefix_length).await
    }

    async fn create_available_prefix(&self, prefix_id: u64, request: CreateChildPrefixRequest) -> Result<Prefix, NetBoxError> {
        ipam::create_available_prefix(self, prefix_id, request).await
    }

    async fn create_ip_address(&self, request: CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        ipam::create_ip_address(self, request).await
    }

    async fn delete_ip_address(&self, id: u64) -> Result<(), NetBoxError> {
        ipam::delete_ip_address(self, id).await
    }

    async fn query_asns(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Asn>, NetBoxError> {
        ipam::query_asns(self, filters, fetch_all).await
    }

    // DCIM Operations - delegated to dcim module
    async fn get_device(&self, id: u64) -> Result<Device, NetBoxError> {
        dcim::get_device(self, id).await
    }

    async fn update_device(&self, id: u64, request: UpdateDeviceRequest) -> Result<Device, NetBoxError> {
        dcim::update_device(self, id, request).await
    }

    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        dcim::query_interfaces(self, filters, fetch_all).await
    }

    async fn create_interface(&self, request: CreateInterfaceRequest) -> Result<Interface, NetBoxError> {
        dcim::create_interface(self, request).await
    }

    async fn query_regions(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Region>, NetBoxError> {
        dcim::query_regions(self, filters, fetch_all).await
    }

    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        dcim::query_manufacturers(self, filters, fetch_all).await
    }

    async fn get_manufacturer_by_name(&self, name: &str) -> Result<Option<Manufacturer>, NetBoxError> {
        dcim::get_manufacturer_by_name(self, name).await
    }

    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        dcim::query_device_types(self, filters, fetch_all).await
    }
}
