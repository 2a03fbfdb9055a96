//! NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// HTTP request/response error (connection refused, TLS, timeout, undecodable body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox API returned an unexpected non-success status
    #[error("NetBox API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// NetBox rejected the request body (HTTP 400), carrying the field errors it reported
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid request built on the client side (e.g., empty base URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
