//! NetBox API models
//!
//! These models follow the NetBox REST API serializers for the IPAM and DCIM
//! objects the helpers touch. Fields NetBox may omit or null are `Option`s or
//! carry `#[serde(default)]`, so partial (brief) representations decode too.

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// A NetBox choice field as rendered in responses: `{"value": "active", "label": "Active"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceField<T> {
    pub value: T,
    #[serde(default)]
    pub label: String,
}

/// Prefix model matching NetBox PrefixSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Prefix {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub prefix: String, // e.g., "10.0.0.0/16"
    #[serde(default)]
    pub vrf: Option<NestedVrf>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub site: Option<NestedSite>,
    #[serde(default)]
    pub role: Option<NestedRole>,
    #[serde(default)]
    pub status: Option<ChoiceField<PrefixStatus>>,
    #[serde(default)]
    pub is_pool: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Prefix {
    /// The prefix as a network, `None` if NetBox sent something unparsable
    #[must_use]
    pub fn network(&self) -> Option<IpNet> {
        self.prefix.parse().ok()
    }

    /// Mask length of the prefix
    #[must_use]
    pub fn mask_length(&self) -> Option<u8> {
        self.network().map(|net| net.prefix_len())
    }
}

/// Entry of `/api/ipam/prefixes/{id}/available-prefixes/`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AvailablePrefix {
    #[serde(default)]
    pub family: u8,
    pub prefix: String,
    #[serde(default)]
    pub vrf: Option<NestedVrf>,
}

/// IP Address model matching NetBox IPAddressSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IPAddress {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub address: String, // e.g., "192.168.1.1/24"
    #[serde(default)]
    pub vrf: Option<NestedVrf>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub status: Option<ChoiceField<IPAddressStatus>>,
    #[serde(default)]
    pub assigned_object_type: Option<String>,
    #[serde(default)]
    pub assigned_object_id: Option<u64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Device model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>, // NetBox allows unnamed devices
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub site: Option<NestedSite>,
    #[serde(default)]
    pub primary_ip4: Option<NestedIPAddress>,
    #[serde(default)]
    pub primary_ip6: Option<NestedIPAddress>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
}

impl Device {
    /// Human-readable label for log lines
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.display)
    }
}

/// Interface model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Interface {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub device: NestedDevice,
    pub name: String,
    #[serde(rename = "type", default)]
    pub interface_type: Option<ChoiceField<String>>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
}

/// ASN model (from IPAM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Asn {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub asn: u64,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub description: String,
}

/// Region model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Region {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Manufacturer model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Manufacturer {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Device type model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceType {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub manufacturer: NestedManufacturer,
    pub model: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

// Nested serializers (brief representations used for references)

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedVrf {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedTenant {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedSite {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedRole {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedTag {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedIPAddress {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedDevice {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NestedManufacturer {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Prefix status choices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixStatus {
    Container,
    Active,
    Reserved,
    Deprecated,
}

/// IP Address status choices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IPAddressStatus {
    Active,
    Reserved,
    Deprecated,
    Dhcp,
    #[serde(rename = "slaac")]
    Slaac,
}

// Request bodies

/// Request body for `POST /api/dcim/interfaces/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInterfaceRequest {
    pub device: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /api/ipam/ip-addresses/`
///
/// `tenant` and `vrf` are always serialized (as `null` when unset) so the
/// record is explicitly created without them rather than picking up defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIPAddressRequest {
    pub address: String,
    pub status: IPAddressStatus,
    pub tenant: Option<u64>,
    pub vrf: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_object_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
}

/// Request body for `POST /api/ipam/prefixes/{id}/available-prefixes/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChildPrefixRequest {
    pub prefix_length: u8,
    pub tenant: Option<u64>,
    pub site: Option<u64>,
    pub vrf: Option<u64>,
    pub description: String,
    pub role: Option<u64>,
}

/// Request body for `PATCH /api/dcim/devices/{id}/`, sent only when set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeviceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip4: Option<u64>,
}
