//! NetBox inventory helpers
//!
//! A small facade over the NetBox API for the chores that come up when
//! racking and addressing devices: picking the next free private ASN or
//! child prefix, adding interfaces and IP addresses, and giving a device a
//! primary management IP inside the right prefix.
//!
//! # Example
//!
//! ```no_run
//! use netbox_helpers::{HelperConfig, NetBoxHelper};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let helper = NetBoxHelper::from_config(&HelperConfig::from_env()?)?;
//!
//! let asn = helper.get_next_asns().await?;
//! let block = helper.get_next_prefix(1, "10.0.0.0/16", 24).await?;
//! let mgmt_ip = helper.add_primary_ip_to_mgmt_interface(42, "10.1.2.5").await?;
//!
//! println!("AS{} {} {}", asn, block, mgmt_ip.address);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod helper;
pub mod numbers;


pub use config::HelperConfig;
pub use error::{ConfigError, HelperError};
pub use helper::{
    NetBoxHelper, NewPrefix, DEFAULT_INTERFACE_TYPE, MGMT_INTERFACE_NAME, MGMT_IP_DESCRIPTION,
    PRIVATE_ASN_MAX, PRIVATE_ASN_MIN,
};
pub use numbers::find_next_free_number;
