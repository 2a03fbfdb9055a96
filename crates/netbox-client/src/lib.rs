//! NetBox REST API Client
//!
//! A Rust client library for the parts of the NetBox REST API used by the
//! inventory helpers: prefixes and their available-prefix sub-resource,
//! IP addresses, ASNs, devices, interfaces, regions, manufacturers and
//! device types.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{NetBoxClient, CreateInterfaceRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Query prefixes
//! let prefixes = client.query_prefixes(&[("prefix", "10.0.0.0/8")], false).await?;
//!
//! // Next free /24 blocks inside the first one
//! if let Some(parent) = prefixes.first() {
//!     let free = client.get_available_prefixes(parent.id, 24).await?;
//!     println!("{} free blocks", free.len());
//! }
//!
//! // Add an interface to a device
//! let interface = client.create_interface(CreateInterfaceRequest {
//!     device: 42,
//!     name: "management".to_string(),
//!     interface_type: "virtual".to_string(),
//!     enabled: true,
//!     description: None,
//! }).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Status mapping**: 400 → `Validation`, 401/403 → `Authentication`, 404 → `NotFound`
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **Mocking**: `MockNetBoxClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{ClientOptions, NetBoxClient};
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{InjectedFailure, MockNetBoxClient};
