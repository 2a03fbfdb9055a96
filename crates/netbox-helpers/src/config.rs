//! Helper configuration
//!
//! Loaded from environment variables, like the controllers that share the
//! NetBox client:
//!
//! | Variable              | Default                  |
//! |-----------------------|--------------------------|
//! | `NETBOX_URL`          | `http://netbox.netbox:80` |
//! | `NETBOX_TOKEN`        | required                 |
//! | `NETBOX_VERIFY_TLS`   | `false`                  |
//! | `NETBOX_TIMEOUT_SECS` | `30`                     |
//!
//! Certificate validation is off unless `NETBOX_VERIFY_TLS` is set, since the
//! helpers are mostly pointed at NetBox instances with self-signed certificates.

use crate::error::ConfigError;
use netbox_client::ClientOptions;
use std::time::Duration;

/// Default NetBox URL when `NETBOX_URL` is unset
pub const DEFAULT_NETBOX_URL: &str = "http://netbox.netbox:80";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for `NetBoxHelper`
#[derive(Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// NetBox base URL
    pub base_url: String,
    /// API token
    pub token: String,
    /// Validate the server certificate
    pub verify_tls: bool,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

// Keeps the token out of log lines
impl std::fmt::Debug for HelperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HelperConfig {
    /// Config for `base_url` and `token` with defaults for everything else
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            verify_tls: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    /// See [`HelperConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// `ConfigError::Missing` without a token, `ConfigError::Invalid` for a
    /// malformed TLS flag or timeout.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("NETBOX_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NETBOX_URL.to_string());
        let token = lookup("NETBOX_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("NETBOX_TOKEN"))?;

        let verify_tls = match lookup("NETBOX_VERIFY_TLS") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "NETBOX_VERIFY_TLS",
                value,
            })?,
            None => false,
        };

        let timeout_secs = match lookup("NETBOX_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "NETBOX_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            token,
            verify_tls,
            timeout_secs,
        })
    }

    /// Transport options for the NetBox client
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: !self.verify_tls,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_token_only() {
        let config = HelperConfig::from_lookup(lookup(&[("NETBOX_TOKEN", "abc")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_NETBOX_URL);
        assert_eq!(config.token, "abc");
        assert!(!config.verify_tls);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.client_options().accept_invalid_certs);
    }

    #[test]
    fn test_missing_token() {
        let result = HelperConfig::from_lookup(lookup(&[("NETBOX_URL", "https://netbox.example")]));
        assert_eq!(result, Err(ConfigError::Missing("NETBOX_TOKEN")));
    }

    #[test]
    fn test_verify_tls_and_timeout_overrides() {
        let config = HelperConfig::from_lookup(lookup(&[
            ("NETBOX_URL", "https://netbox.example"),
            ("NETBOX_TOKEN", "abc"),
            ("NETBOX_VERIFY_TLS", "Yes"),
            ("NETBOX_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert!(config.verify_tls);
        assert!(!config.client_options().accept_invalid_certs);
        assert_eq!(config.client_options().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let result = HelperConfig::from_lookup(lookup(&[
            ("NETBOX_TOKEN", "abc"),
            ("NETBOX_VERIFY_TLS", "maybe"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "NETBOX_VERIFY_TLS", .. })));

        let result = HelperConfig::from_lookup(lookup(&[
            ("NETBOX_TOKEN", "abc"),
            ("NETBOX_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "NETBOX_TIMEOUT_SECS", .. })));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = HelperConfig::new("http://netbox", "secret-token");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
