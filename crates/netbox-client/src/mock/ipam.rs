//! IPAM operations for MockNetBoxClient
//!
//! Handles prefixes, available prefixes, IP addresses and ASNs

use super::helpers::cidr_contains;
use ipnet::IpNet;
use super::{lock, MockNetBoxClient};
use crate::error::NetBoxError;
use crate::models::*;

/// Match an optional reference ID against a filter value, where "null" means unset
fn matches_ref(id: Option<u64>, value: &str) -> bool {
    if value == "null" {
        id.is_none()
    } else {
        value.parse::<u64>().ok() == id
    }
}

pub async fn query_prefixes(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
    lock(&client.prefix_queries).push(
        filters.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    );
    client.enter("query_prefixes")?;

    let mut results: Vec<Prefix> = lock(&client.prefixes).values().cloned().collect();

    // Apply the filters the helpers use; others are ignored
    for (key, value) in filters {
        match *key {
            "prefix" => results.retain(|p| p.prefix == *value),
            "vrf_id" => results.retain(|p| matches_ref(p.vrf.as_ref().map(|v| v.id), value)),
            "tenant_id" => results.retain(|p| matches_ref(p.tenant.as_ref().map(|t| t.id), value)),
            "contains" => results.retain(|p| cidr_contains(&p.prefix, value)),
            "mask_length" => {
                let length = value.parse::<u8>().ok();
                results.retain(|p| p.mask_length() == length);
            }
            _ => {}
        }
    }

    Ok(results)
}

pub async fn get_available_prefixes(client: &MockNetBoxClient, prefix_id: u64, _prefix_length: u8) -> Result<Vec<AvailablePrefix>, NetBoxError> {
    client.enter("get_available_prefixes")?;
    if !lock(&client.prefixes).contains_key(&prefix_id) {
        return Err(NetBoxError::NotFound(format!("Prefix {} not found", prefix_id)));
    }

    Ok(lock(&client.available_prefixes)
        .get(&prefix_id)
        .cloned()
        .unwrap_or_default())
}

pub async fn create_available_prefix(client: &MockNetBoxClient, prefix_id: u64, request: CreateChildPrefixRequest) -> Result<Prefix, NetBoxError> {
    client.enter("create_available_prefix")?;
    if !lock(&client.prefixes).contains_key(&prefix_id) {
        return Err(NetBoxError::NotFound(format!("Prefix {} not found", prefix_id)));
    }

    // Carve the child from the first free block large enough to hold it and
    // put the rest of that block back in its place
    let helpers = client.helpers();
    let child = {
        let mut available = lock(&client.available_prefixes);
        let blocks = available.entry(prefix_id).or_default();
        let carved = blocks.iter().enumerate().find_map(|(index, block)| {
            let network = block.prefix.parse::<IpNet>().ok()?.trunc();
            let mut subnets = network.subnets(request.prefix_length).ok()?;
            let child = subnets.next()?;
            Some((index, child, IpNet::aggregate(&subnets.collect::<Vec<_>>())))
        });
        carved.map(|(index, child, rest)| {
            let rest = rest.iter().map(|net| helpers.available_prefix(&net.to_string()));
            blocks.splice(index..=index, rest);
            child
        })
    };
    let Some(child) = child else {
        return Err(NetBoxError::Api(format!(
            "POST /api/ipam/prefixes/{}/available-prefixes/ failed: 409 Conflict - Insufficient space is available to accommodate the requested number of prefixes",
            prefix_id
        )));
    };

    let id = client.next_id();
    let mut prefix = helpers.prefix(id, &child.to_string());
    prefix.vrf = request.vrf.map(|v| helpers.nested_vrf(v));
    prefix.tenant = request.tenant.map(|t| helpers.nested_tenant(t));
    prefix.site = request.site.map(|s| helpers.nested_site(s));
    prefix.role = request.role.map(|r| helpers.nested_role(r));
    prefix.description = request.description;

    lock(&client.prefixes).insert(id, prefix.clone());
    Ok(prefix)
}

pub async fn create_ip_address(client: &MockNetBoxClient, request: CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
    client.enter("create_ip_address")?;
    if !request.address.contains('/') {
        return Err(NetBoxError::Validation(format!(
            "{{\"address\": [\"Address {} must include a mask length\"]}}",
            request.address
        )));
    }

    let helpers = client.helpers();
    let id = client.next_id();
    let ip = IPAddress {
        id,
        url: format!("{}/api/ipam/ip-addresses/{}/", client.base_url, id),
        display: request.address.clone(),
        address: request.address,
        vrf: request.vrf.map(|v| helpers.nested_vrf(v)),
        tenant: request.tenant.map(|t| helpers.nested_tenant(t)),
        status: Some(ChoiceField { value: request.status, label: format!("{:?}", request.status) }),
        assigned_object_type: request.assigned_object_type,
        assigned_object_id: request.assigned_object_id,
        description: request.description.unwrap_or_default(),
        tags: request.tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag_id| NestedTag {
                id: tag_id,
                url: format!("{}/api/extras/tags/{}/", client.base_url, tag_id),
                display: String::new(),
                name: String::new(),
                slug: String::new(),
            })
            .collect(),
        created: Some(chrono::Utc::now().to_rfc3339()),
        last_updated: Some(chrono::Utc::now().to_rfc3339()),
    };

    lock(&client.ip_addresses).insert(id, ip.clone());
    Ok(ip)
}

pub async fn delete_ip_address(client: &MockNetBoxClient, id: u64) -> Result<(), NetBoxError> {
    client.enter("delete_ip_address")?;
    lock(&client.ip_addresses)
        .remove(&id)
        .map(|_| ())
        .ok_or_else(|| NetBoxError::NotFound(format!("IP address {} not found", id)))
}

pub async fn query_asns(client: &MockNetBoxClient, _filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Asn>, NetBoxError> {
    client.enter("query_asns")?;
    Ok(lock(&client.asns).values().cloned().collect())
}
