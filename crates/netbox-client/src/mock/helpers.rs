//! Helper functions for creating NetBox model fixtures in mock implementations

use crate::models::*;
use ipnet::IpNet;
use std::net::IpAddr;

/// Builders for nested references and full fixtures, with URLs under one base URL
#[derive(Debug, Clone)]
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, collection: &str, id: u64) -> String {
        format!("{}/api/{}/{}/", self.base_url, collection, id)
    }

    /// Helper to create NestedTenant
    pub fn nested_tenant(&self, id: u64) -> NestedTenant {
        let name = format!("Tenant {}", id);
        NestedTenant {
            id,
            url: self.url("tenancy/tenants", id),
            display: name.clone(),
            slug: name.to_lowercase().replace(' ', "-"),
            name,
        }
    }

    /// Helper to create NestedVrf
    pub fn nested_vrf(&self, id: u64) -> NestedVrf {
        let name = format!("VRF {}", id);
        NestedVrf {
            id,
            url: self.url("ipam/vrfs", id),
            display: name.clone(),
            name,
        }
    }

    /// Helper to create NestedSite
    pub fn nested_site(&self, id: u64) -> NestedSite {
        let name = format!("Site {}", id);
        NestedSite {
            id,
            url: self.url("dcim/sites", id),
            display: name.clone(),
            slug: name.to_lowercase().replace(' ', "-"),
            name,
        }
    }

    /// Helper to create NestedRole
    pub fn nested_role(&self, id: u64) -> NestedRole {
        let name = format!("Role {}", id);
        NestedRole {
            id,
            url: self.url("ipam/roles", id),
            display: name.clone(),
            slug: name.to_lowercase().replace(' ', "-"),
            name,
        }
    }

    /// Helper to create NestedIPAddress from a stored address
    pub fn nested_ip_address(&self, ip: &IPAddress) -> NestedIPAddress {
        NestedIPAddress {
            id: ip.id,
            url: ip.url.clone(),
            display: ip.address.clone(),
            address: ip.address.clone(),
        }
    }

    /// Helper to create NestedDevice
    pub fn nested_device(&self, id: u64, name: Option<String>) -> NestedDevice {
        NestedDevice {
            id,
            url: self.url("dcim/devices", id),
            display: name.clone().unwrap_or_else(|| format!("Device {}", id)),
            name,
        }
    }

    /// Prefix fixture with no VRF, tenant, site or role
    pub fn prefix(&self, id: u64, cidr: &str) -> Prefix {
        Prefix {
            id,
            url: self.url("ipam/prefixes", id),
            display: cidr.to_string(),
            prefix: cidr.to_string(),
            vrf: None,
            tenant: None,
            site: None,
            role: None,
            status: Some(ChoiceField { value: PrefixStatus::Active, label: "Active".to_string() }),
            is_pool: false,
            description: String::new(),
            tags: vec![],
            created: Some(chrono::Utc::now().to_rfc3339()),
            last_updated: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Entry of an available-prefixes listing
    pub fn available_prefix(&self, cidr: &str) -> AvailablePrefix {
        AvailablePrefix {
            family: match cidr.parse::<IpNet>() {
                Ok(IpNet::V6(_)) => 6,
                _ => 4,
            },
            prefix: cidr.to_string(),
            vrf: None,
        }
    }

    /// Device fixture with no tenant and no primary IP
    pub fn device(&self, id: u64, name: &str) -> Device {
        Device {
            id,
            url: self.url("dcim/devices", id),
            display: name.to_string(),
            name: Some(name.to_string()),
            tenant: None,
            site: None,
            primary_ip4: None,
            primary_ip6: None,
            tags: vec![],
        }
    }

    /// Enabled interface fixture on `device`
    pub fn interface(&self, id: u64, device: &Device, name: &str, interface_type: &str) -> Interface {
        Interface {
            id,
            url: self.url("dcim/interfaces", id),
            display: name.to_string(),
            device: self.nested_device(device.id, device.name.clone()),
            name: name.to_string(),
            interface_type: Some(ChoiceField { value: interface_type.to_string(), label: interface_type.to_string() }),
            enabled: true,
            description: String::new(),
        }
    }

    /// ASN fixture
    pub fn asn(&self, id: u64, asn: u64) -> Asn {
        Asn {
            id,
            url: self.url("ipam/asns", id),
            display: format!("AS{}", asn),
            asn,
            tenant: None,
            description: String::new(),
        }
    }

    /// Region fixture
    pub fn region(&self, id: u64, name: &str) -> Region {
        Region {
            id,
            url: self.url("dcim/regions", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: String::new(),
        }
    }

    /// Manufacturer fixture
    pub fn manufacturer(&self, id: u64, name: &str) -> Manufacturer {
        Manufacturer {
            id,
            url: self.url("dcim/manufacturers", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: String::new(),
        }
    }

    /// Device type fixture belonging to `manufacturer`
    pub fn device_type(&self, id: u64, manufacturer: &Manufacturer, model: &str) -> DeviceType {
        DeviceType {
            id,
            url: self.url("dcim/device-types", id),
            display: model.to_string(),
            manufacturer: NestedManufacturer {
                id: manufacturer.id,
                url: manufacturer.url.clone(),
                display: manufacturer.display.clone(),
                name: manufacturer.name.clone(),
                slug: manufacturer.slug.clone(),
            },
            model: model.to_string(),
            slug: model.to_lowercase().replace(' ', "-"),
            description: String::new(),
        }
    }
}

/// Whether the network `cidr` contains `address` (with or without a mask)
pub(crate) fn cidr_contains(cidr: &str, address: &str) -> bool {
    let Ok(network) = cidr.parse::<IpNet>() else {
        return false;
    };
    let address = address
        .parse::<IpNet>()
        .map(|net| net.addr())
        .ok()
        .or_else(|| address.parse::<IpAddr>().ok());

    address.is_some_and(|addr| network.contains(&addr))
}
