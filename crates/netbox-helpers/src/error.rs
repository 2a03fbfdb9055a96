//! Helper error types.
//!
//! Every helper operation reports failure through `HelperError` instead of
//! panicking, so callers can tell a missing object from a rejected request,
//! a transport problem, or a search that simply found nothing free.

use netbox_client::NetBoxError;
use thiserror::Error;

/// Why a helper operation did not produce a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HelperError {
    /// A lookup (device, interface, prefix, ...) returned nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// NetBox or local input validation rejected the request
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Connection, authentication or unexpected API failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The search ran to completion but nothing is free (ASN range, child prefixes)
    #[error("None available: {0}")]
    Exhausted(String),
}

impl HelperError {
    /// Short stable name of the variant, for logs and exit messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HelperError::NotFound(_) => "not-found",
            HelperError::Validation(_) => "validation",
            HelperError::Transport(_) => "transport",
            HelperError::Exhausted(_) => "exhausted",
        }
    }
}

impl From<NetBoxError> for HelperError {
    fn from(error: NetBoxError) -> Self {
        match error {
            NetBoxError::NotFound(detail) => HelperError::NotFound(detail),
            NetBoxError::Validation(detail) | NetBoxError::InvalidRequest(detail) => {
                HelperError::Validation(detail)
            }
            other @ (NetBoxError::Http(_)
            | NetBoxError::Api(_)
            | NetBoxError::Serialization(_)
            | NetBoxError::Authentication(_)) => HelperError::Transport(other.to_string()),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// An environment variable is set but cannot be parsed
    #[error("Invalid value '{value}' for {name}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value found
        value: String,
    },
}
