//! DCIM operations for MockNetBoxClient
//!
//! Handles devices, interfaces, regions, manufacturers and device types

use super::{lock, MockNetBoxClient};
use crate::error::NetBoxError;
use crate::models::*;

pub async fn get_device(client: &MockNetBoxClient, id: u64) -> Result<Device, NetBoxError> {
    client.enter("get_device")?;
    lock(&client.devices)
        .get(&id)
        .cloned()
        .ok_or_else(|| NetBoxError::NotFound(format!("Device {} not found", id)))
}

pub async fn update_device(client: &MockNetBoxClient, id: u64, request: UpdateDeviceRequest) -> Result<Device, NetBoxError> {
    client.enter("update_device")?;
    let helpers = client.helpers();

    let primary_ip4 = match request.primary_ip4 {
        Some(ip_id) => {
            let ip = lock(&client.ip_addresses).get(&ip_id).cloned().ok_or_else(|| {
                NetBoxError::Validation(format!(
                    "{{\"primary_ip4\": [\"Related object not found using the provided numeric ID: {}\"]}}",
                    ip_id
                ))
            })?;
            Some(helpers.nested_ip_address(&ip))
        }
        None => None,
    };

    let mut devices = lock(&client.devices);
    let device = devices
        .get_mut(&id)
        .ok_or_else(|| NetBoxError::NotFound(format!("Device {} not found", id)))?;

    if primary_ip4.is_some() {
        device.primary_ip4 = primary_ip4;
    }

    Ok(device.clone())
}

pub async fn query_interfaces(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
    client.enter("query_interfaces")?;
    let mut results: Vec<Interface> = lock(&client.interfaces).values().cloned().collect();

    for (key, value) in filters {
        match *key {
            "device_id" => results.retain(|i| value.parse::<u64>().ok() == Some(i.device.id)),
            "name" => results.retain(|i| i.name == *value),
            _ => {}
        }
    }

    Ok(results)
}

pub async fn create_interface(client: &MockNetBoxClient, request: CreateInterfaceRequest) -> Result<Interface, NetBoxError> {
    client.enter("create_interface")?;

    let device = lock(&client.devices).get(&request.device).cloned().ok_or_else(|| {
        NetBoxError::Validation(format!(
            "{{\"device\": [\"Related object not found using the provided numeric ID: {}\"]}}",
            request.device
        ))
    })?;

    let duplicate = lock(&client.interfaces)
        .values()
        .any(|i| i.device.id == device.id && i.name == request.name);
    if duplicate {
        return Err(NetBoxError::Validation(
            "{\"__all__\": [\"Interface with this Device and Name already exists.\"]}".to_string(),
        ));
    }

    let id = client.next_id();
    let mut interface = client.helpers().interface(id, &device, &request.name, &request.interface_type);
    interface.enabled = request.enabled;
    interface.description = request.description.unwrap_or_default();

    lock(&client.interfaces).insert(id, interface.clone());
    Ok(interface)
}

pub async fn query_regions(client: &MockNetBoxClient, _filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Region>, NetBoxError> {
    client.enter("query_regions")?;
    Ok(lock(&client.regions).values().cloned().collect())
}

pub async fn query_manufacturers(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
    client.enter("query_manufacturers")?;
    let mut results: Vec<Manufacturer> = lock(&client.manufacturers).values().cloned().collect();

    for (key, value) in filters {
        if *key == "name" {
            results.retain(|m| m.name == *value);
        }
    }

    Ok(results)
}

pub async fn get_manufacturer_by_name(client: &MockNetBoxClient, name: &str) -> Result<Option<Manufacturer>, NetBoxError> {
    client.enter("get_manufacturer_by_name")?;
    Ok(lock(&client.manufacturers)
        .values()
        .find(|m| m.name == name)
        .cloned())
}

pub async fn query_device_types(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
    client.enter("query_device_types")?;
    let mut results: Vec<DeviceType> = lock(&client.device_types).values().cloned().collect();

    for (key, value) in filters {
        if *key == "manufacturer_id" {
            results.retain(|d| value.parse::<u64>().ok() == Some(d.manufacturer.id));
        }
    }

    Ok(results)
}
