//! NetBox inventory helper
//!
//! `NetBoxHelper` wraps one NetBox client and turns common inventory chores
//! into single calls. Each operation resolves its inputs with read queries,
//! performs at most one mutating call (plus a compensating delete in the
//! primary-IP workflow), and reports the outcome as `Result<_, HelperError>`.
//! Every failure branch is logged before it is returned.

use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::numbers::find_next_free_number;
use netbox_client::{
    CreateChildPrefixRequest, CreateIPAddressRequest, CreateInterfaceRequest, IPAddress,
    IPAddressStatus, Interface, NetBoxClient, NetBoxClientTrait, NetBoxError, Prefix,
    UpdateDeviceRequest,
};
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

/// Lower bound of the private-use ASN range searched by `get_next_asns`
pub const PRIVATE_ASN_MIN: u64 = 64512;
/// Exclusive upper bound of the private-use ASN range searched by `get_next_asns`
pub const PRIVATE_ASN_MAX: u64 = 65534;

/// Interface type used when `add_interface_to_device` is not given one
pub const DEFAULT_INTERFACE_TYPE: &str = "virtual";
/// Name of the interface that carries a device's primary management IP
pub const MGMT_INTERFACE_NAME: &str = "management";
/// Description written on management IP records
pub const MGMT_IP_DESCRIPTION: &str = "Primary management IP address";

// Mask lengths probed when locating the prefix of a management IP, [24, 31)
const MGMT_MASK_MIN: u8 = 24;
const MGMT_MASK_END: u8 = 31;

const INTERFACE_OBJECT_TYPE: &str = "dcim.interface";

/// Child prefix to allocate with `create_next_prefix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrefix {
    /// Tenant to set on the new prefix
    pub tenant_id: Option<u64>,
    /// Site to set on the new prefix
    pub site_id: Option<u64>,
    /// VRF of the supernet; also set on the new prefix
    pub vrf_id: u64,
    /// Parent prefix in CIDR form, e.g. "10.0.0.0/16"
    pub supernet: String,
    /// Description of the new prefix
    pub description: String,
    /// Mask length of the new prefix
    pub length: u8,
    /// Role to set on the new prefix
    pub role_id: Option<u64>,
}

/// Log a failed NetBox call with its context and convert it
fn failure(context: &str, error: NetBoxError) -> HelperError {
    let error = HelperError::from(error);
    error!("{}: {}", context, error);
    error
}

/// Log and build a `NotFound`
fn not_found(message: String) -> HelperError {
    error!("{}", message);
    HelperError::NotFound(message)
}

/// Inventory helper facade over the NetBox API
pub struct NetBoxHelper {
    client: Box<dyn NetBoxClientTrait>,
}

impl std::fmt::Debug for NetBoxHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetBoxHelper")
            .field("base_url", &self.client.base_url())
            .finish()
    }
}

impl NetBoxHelper {
    /// Connect to NetBox at `api_url` with `token`.
    ///
    /// TLS certificate validation is disabled for this connection (a warning
    /// is logged). Use `from_config` with `verify_tls: true` to keep it on.
    ///
    /// # Errors
    /// `HelperError::Transport` if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, HelperError> {
        Self::from_config(&HelperConfig::new(api_url, token))
    }

    /// Connect to NetBox using a loaded configuration
    ///
    /// # Errors
    /// `HelperError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &HelperConfig) -> Result<Self, HelperError> {
        let client = NetBoxClient::with_options(
            config.base_url.clone(),
            config.token.clone(),
            &config.client_options(),
        )
        .map_err(|e| failure("Failed to create NetBox client", e))?;

        Ok(Self::with_client(client))
    }

    /// Build a helper around an existing client (e.g., a mock in tests)
    pub fn with_client(client: impl NetBoxClientTrait + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Base URL of the NetBox instance
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Check connectivity and token validity
    ///
    /// # Errors
    /// Whatever the status probe failed with, mapped to a [`HelperError`].
    pub async fn validate_token(&self) -> Result<(), HelperError> {
        self.client
            .validate_token()
            .await
            .map_err(|e| failure("NetBox token validation failed", e))
    }

    /// Smallest integer in `[min_value, max_value)` not present in `used`.
    ///
    /// Pure computation, see [`find_next_free_number`](crate::find_next_free_number).
    #[must_use]
    pub fn find_next_free_number<I>(&self, used: I, min_value: u64, max_value: u64) -> Option<u64>
    where
        I: IntoIterator<Item = u64>,
    {
        find_next_free_number(used, min_value, max_value)
    }

    /// Look up a prefix by its exact CIDR within a VRF
    async fn lookup_prefix(&self, prefix: &str, vrf_id: u64) -> Result<Option<Prefix>, HelperError> {
        let vrf = vrf_id.to_string();
        let mut matches = self.client
            .query_prefixes(&[("prefix", prefix), ("vrf_id", vrf.as_str())], false)
            .await
            .map_err(|e| failure(&format!("Error looking up prefix '{}'", prefix), e))?;

        if matches.len() > 1 {
            warn!("{} prefixes match '{}' in VRF ID {}, using the first", matches.len(), prefix, vrf_id);
        }
        Ok(if matches.is_empty() { None } else { Some(matches.swap_remove(0)) })
    }

    /// Next available child prefix of `length` bits inside `container` (in VRF `vrf_id`).
    ///
    /// The first entry NetBox lists is returned as-is; no re-sorting.
    ///
    /// # Errors
    /// * `HelperError::NotFound` - `container` does not exist in the VRF
    /// * `HelperError::Exhausted` - no block of that length is free
    /// * `HelperError::Transport` - NetBox could not be queried
    pub async fn get_next_prefix(&self, vrf_id: u64, container: &str, length: u8) -> Result<String, HelperError> {
        let Some(parent) = self.lookup_prefix(container, vrf_id).await? else {
            return Err(not_found(format!("Prefix '{}' not found.", container)));
        };

        let available = self.client
            .get_available_prefixes(parent.id, length)
            .await
            .map_err(|e| failure("Error retrieving available prefixes", e))?;

        match available.into_iter().next() {
            Some(first) => {
                debug!("Next available /{} in '{}': {}", length, container, first.prefix);
                Ok(first.prefix)
            }
            None => {
                let message = format!("No available prefixes of length {} in '{}'.", length, container);
                warn!("{}", message);
                Err(HelperError::Exhausted(message))
            }
        }
    }

    /// Add an enabled interface to a device.
    ///
    /// `interface_type` defaults to [`DEFAULT_INTERFACE_TYPE`].
    ///
    /// # Errors
    /// `HelperError::Validation` when NetBox rejects the interface (e.g. a duplicate name).
    pub async fn add_interface_to_device(
        &self,
        device_id: u64,
        interface_name: &str,
        interface_type: Option<&str>,
    ) -> Result<Interface, HelperError> {
        let request = CreateInterfaceRequest {
            device: device_id,
            name: interface_name.to_string(),
            interface_type: interface_type.unwrap_or(DEFAULT_INTERFACE_TYPE).to_string(),
            enabled: true,
            description: None,
        };

        let interface = self.client
            .create_interface(request)
            .await
            .map_err(|e| failure("Error adding interface", e))?;

        info!("Added new interface '{}' to device ID {}", interface_name, device_id);
        Ok(interface)
    }

    /// Create an active IP address (CIDR form) assigned to an interface
    ///
    /// # Errors
    /// `HelperError::Validation` when NetBox rejects the address.
    pub async fn add_ip_address_to_interface(
        &self,
        interface_id: u64,
        tenant_id: Option<u64>,
        vrf_id: Option<u64>,
        ip_address: &str,
    ) -> Result<IPAddress, HelperError> {
        let request = CreateIPAddressRequest {
            address: ip_address.to_string(),
            status: IPAddressStatus::Active,
            tenant: tenant_id,
            vrf: vrf_id,
            assigned_object_type: Some(INTERFACE_OBJECT_TYPE.to_string()),
            assigned_object_id: Some(interface_id),
            description: None,
            tags: None,
        };

        let ip = self.client
            .create_ip_address(request)
            .await
            .map_err(|e| failure("Error assigning IP address", e))?;

        info!("Assigned IP address '{}' to interface ID {}", ip_address, interface_id);
        Ok(ip)
    }

    /// Find the prefix holding `address` by probing mask lengths 24..=30 in order.
    ///
    /// The first mask length with at least one match wins, and its first match is used.
    async fn find_containing_prefix(
        &self,
        address: &IpAddr,
        tenant_id: Option<u64>,
    ) -> Result<Option<(Prefix, u8)>, HelperError> {
        let address = address.to_string();
        let tenant = tenant_id.map(|id| id.to_string());

        for mask_length in MGMT_MASK_MIN..MGMT_MASK_END {
            let mask = mask_length.to_string();
            let mut filters = vec![("contains", address.as_str()), ("mask_length", mask.as_str())];
            if let Some(tenant) = tenant.as_deref() {
                filters.push(("tenant_id", tenant));
            }

            let prefixes = self.client
                .query_prefixes(&filters, false)
                .await
                .map_err(|e| failure("NetBox API error", e))?;

            if let Some(prefix) = prefixes.into_iter().next() {
                debug!("Found prefix {} for {} at mask length {}", prefix.prefix, address, mask_length);
                return Ok(Some((prefix, mask_length)));
            }
        }

        Ok(None)
    }

    /// Remove an IP record whose device update failed; failures here are only logged
    async fn discard_orphaned_ip(&self, ip: &IPAddress) {
        match self.client.delete_ip_address(ip.id).await {
            Ok(()) => info!("Removed IP address {} (ID {}) after failed device update", ip.address, ip.id),
            Err(e) => error!(
                "Failed to remove IP address {} (ID {}) after failed device update, record is orphaned: {}",
                ip.address, ip.id, e
            ),
        }
    }

    /// Give a device a primary IPv4 on its "management" interface.
    ///
    /// This method:
    /// 1. Fetches the device and its interface named exactly "management"
    /// 2. Finds the containing prefix of `ip_address` (mask lengths 24..=30, device tenant)
    /// 3. Creates `ip_address/mask` on the management interface with the prefix's VRF
    /// 4. Sets it as the device's primary IPv4
    ///
    /// If step 4 fails the IP record from step 3 is deleted again before the
    /// error is returned.
    ///
    /// # Arguments
    /// * `device_id` - Device ID
    /// * `ip_address` - Bare address without mask, e.g. "10.1.2.5"
    ///
    /// # Returns
    /// The IP record now set as primary.
    ///
    /// # Errors
    /// The first step that failed; later steps were not run.
    pub async fn add_primary_ip_to_mgmt_interface(&self, device_id: u64, ip_address: &str) -> Result<IPAddress, HelperError> {
        let address: IpAddr = ip_address.parse().map_err(|e| {
            let message = format!("'{}' is not a valid IP address: {}", ip_address, e);
            error!("{}", message);
            HelperError::Validation(message)
        })?;

        let device = match self.client.get_device(device_id).await {
            Ok(device) => device,
            Err(NetBoxError::NotFound(_)) => {
                return Err(not_found(format!("Device with ID {} not found.", device_id)));
            }
            Err(e) => return Err(failure("NetBox API error", e)),
        };

        let device_filter = device_id.to_string();
        let mgmt_interface = self.client
            .query_interfaces(&[("device_id", device_filter.as_str()), ("name", MGMT_INTERFACE_NAME)], false)
            .await
            .map_err(|e| failure("NetBox API error", e))?
            .into_iter()
            .find(|i| i.name == MGMT_INTERFACE_NAME);
        let Some(mgmt_interface) = mgmt_interface else {
            return Err(not_found(format!(
                "Management interface not found for device '{}'.",
                device.label()
            )));
        };

        let tenant_id = device.tenant.as_ref().map(|t| t.id);

        let Some((prefix, mask)) = self.find_containing_prefix(&address, tenant_id).await? else {
            let tenant_name = device.tenant.as_ref().map_or("None", |t| t.name.as_str());
            return Err(not_found(format!(
                "No prefix found for {} in tenant '{}'.",
                address, tenant_name
            )));
        };

        let vrf_id = prefix.vrf.as_ref().map(|v| v.id);

        let request = CreateIPAddressRequest {
            address: format!("{}/{}", address, mask),
            status: IPAddressStatus::Active,
            tenant: tenant_id,
            vrf: vrf_id,
            assigned_object_type: Some(INTERFACE_OBJECT_TYPE.to_string()),
            assigned_object_id: Some(mgmt_interface.id),
            description: Some(MGMT_IP_DESCRIPTION.to_string()),
            tags: Some(vec![]),
        };
        let ip = self.client
            .create_ip_address(request)
            .await
            .map_err(|e| failure("NetBox API error", e))?;

        let update = UpdateDeviceRequest { primary_ip4: Some(ip.id) };
        if let Err(e) = self.client.update_device(device.id, update).await {
            let error = failure(&format!("Failed to set primary IP on device '{}'", device.label()), e);
            self.discard_orphaned_ip(&ip).await;
            return Err(error);
        }

        info!(
            "Primary IP address {} added to the management interface of device '{}'.",
            address,
            device.label()
        );
        Ok(ip)
    }

    /// Names of all regions, in the order NetBox returns them
    ///
    /// # Errors
    /// `HelperError::Transport` when the listing fails.
    pub async fn get_regions_list(&self) -> Result<Vec<String>, HelperError> {
        let regions = self.client
            .query_regions(&[], true)
            .await
            .map_err(|e| failure("Error retrieving regions", e))?;

        Ok(regions.into_iter().map(|r| r.name).collect())
    }

    /// Model names of all device types made by `manufacturer_name`.
    ///
    /// An unknown manufacturer yields an empty list (logged), not an error.
    ///
    /// # Errors
    /// `HelperError::Transport` when a listing fails.
    pub async fn get_device_model_list(&self, manufacturer_name: &str) -> Result<Vec<String>, HelperError> {
        let manufacturer = self.client
            .get_manufacturer_by_name(manufacturer_name)
            .await
            .map_err(|e| failure("Error retrieving manufacturer", e))?;

        let Some(manufacturer) = manufacturer else {
            error!("Manufacturer '{}' not found.", manufacturer_name);
            return Ok(Vec::new());
        };

        let manufacturer_id = manufacturer.id.to_string();
        let device_types = self.client
            .query_device_types(&[("manufacturer_id", manufacturer_id.as_str())], true)
            .await
            .map_err(|e| failure("Error retrieving device types", e))?;

        Ok(device_types.into_iter().map(|d| d.model).collect())
    }

    /// Next unused private ASN in `[PRIVATE_ASN_MIN, PRIVATE_ASN_MAX)`
    ///
    /// # Errors
    /// `HelperError::Exhausted` once the whole private range is allocated.
    pub async fn get_next_asns(&self) -> Result<u64, HelperError> {
        let asns = self.client
            .query_asns(&[], true)
            .await
            .map_err(|e| failure("Error retrieving ASNs", e))?;

        find_next_free_number(asns.into_iter().map(|a| a.asn), PRIVATE_ASN_MIN, PRIVATE_ASN_MAX).ok_or_else(|| {
            let message = format!(
                "No free private ASN between {} and {}.",
                PRIVATE_ASN_MIN, PRIVATE_ASN_MAX
            );
            warn!("{}", message);
            HelperError::Exhausted(message)
        })
    }

    /// Allocate the next free child prefix from a supernet and record it in NetBox
    ///
    /// # Errors
    /// * `HelperError::NotFound` - the supernet is not in the VRF
    /// * `HelperError::Transport` - NetBox refused the allocation (409 when the supernet is full)
    pub async fn create_next_prefix(&self, new_prefix: &NewPrefix) -> Result<Prefix, HelperError> {
        let Some(supernet) = self.lookup_prefix(&new_prefix.supernet, new_prefix.vrf_id).await? else {
            return Err(not_found(format!(
                "Supernet '{}' not found in VRF ID {}.",
                new_prefix.supernet, new_prefix.vrf_id
            )));
        };

        let request = CreateChildPrefixRequest {
            prefix_length: new_prefix.length,
            tenant: new_prefix.tenant_id,
            site: new_prefix.site_id,
            vrf: Some(new_prefix.vrf_id),
            description: new_prefix.description.clone(),
            role: new_prefix.role_id,
        };

        let created = self.client
            .create_available_prefix(supernet.id, request)
            .await
            .map_err(|e| failure("Error creating new prefix", e))?;

        info!("Created new prefix '{}' in supernet '{}'.", created.prefix, new_prefix.supernet);
        Ok(created)
    }
}
