//! Command-line definitions

use clap::{Args, Parser, Subcommand};

/// Inventory chores against a NetBox instance
#[derive(Debug, Parser)]
#[command(name = "netbox-helper", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection and output options shared by every command.
///
/// Connection flags override the matching `NETBOX_*` environment variables.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// NetBox base URL (overrides NETBOX_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token (overrides NETBOX_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Validate the server certificate, `--verify-tls false` turns it off (overrides NETBOX_VERIFY_TLS)
    #[arg(long, global = true, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub verify_tls: Option<bool>,

    /// Request timeout in seconds (overrides NETBOX_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Print created records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Smallest number in [min, max) not in the used list (no NetBox access)
    NextFree {
        /// Numbers already taken, comma separated
        #[arg(long, value_delimiter = ',')]
        used: Vec<u64>,
        /// Lower bound, inclusive
        #[arg(long)]
        min: u64,
        /// Upper bound, exclusive
        #[arg(long)]
        max: u64,
    },

    /// Next available child prefix of a container
    NextPrefix {
        #[arg(long)]
        vrf_id: u64,
        /// Container prefix, e.g. 10.0.0.0/16
        #[arg(long)]
        container: String,
        /// Mask length of the child prefix
        #[arg(long)]
        length: u8,
    },

    /// Add an enabled interface to a device
    AddInterface {
        #[arg(long)]
        device_id: u64,
        #[arg(long)]
        name: String,
        /// NetBox interface type, defaults to "virtual"
        #[arg(long = "type")]
        interface_type: Option<String>,
    },

    /// Create an IP address on an interface
    AddIp {
        #[arg(long)]
        interface_id: u64,
        #[arg(long)]
        tenant_id: Option<u64>,
        #[arg(long)]
        vrf_id: Option<u64>,
        /// Address with mask, e.g. 10.1.2.9/24
        #[arg(long)]
        address: String,
    },

    /// Set a device's primary IPv4 on its management interface
    PrimaryIp {
        #[arg(long)]
        device_id: u64,
        /// Address without mask, e.g. 10.1.2.5
        #[arg(long)]
        address: String,
    },

    /// List region names
    Regions,

    /// List device models of a manufacturer
    DeviceModels {
        #[arg(long)]
        manufacturer: String,
    },

    /// Next unused private ASN
    NextAsn,

    /// Allocate and record the next free child prefix of a supernet
    CreatePrefix {
        /// Supernet prefix, e.g. 10.20.0.0/16
        #[arg(long)]
        supernet: String,
        #[arg(long)]
        vrf_id: u64,
        /// Mask length of the new prefix
        #[arg(long)]
        length: u8,
        #[arg(long)]
        tenant_id: Option<u64>,
        #[arg(long)]
        site_id: Option<u64>,
        #[arg(long)]
        role_id: Option<u64>,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Check connectivity and token validity
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_next_free_with_used_list() {
        let cli = Cli::try_parse_from(["netbox-helper", "next-free", "--used", "10,11,12", "--min", "10", "--max", "20"]).unwrap();
        match cli.command {
            Command::NextFree { used, min, max } => {
                assert_eq!(used, vec![10, 11, 12]);
                assert_eq!((min, max), (10, 20));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "netbox-helper", "primary-ip", "--device-id", "42", "--address", "10.1.2.5",
            "--url", "https://netbox.example", "--verify-tls", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.url.as_deref(), Some("https://netbox.example"));
        assert_eq!(cli.global.verify_tls, Some(true));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_verify_tls_can_be_switched_off() {
        let cli = Cli::try_parse_from(["netbox-helper", "regions", "--verify-tls", "false"]).unwrap();
        assert_eq!(cli.global.verify_tls, Some(false));

        let cli = Cli::try_parse_from(["netbox-helper", "regions"]).unwrap();
        assert_eq!(cli.global.verify_tls, None);
    }

    #[test]
    fn test_interface_type_flag() {
        let cli = Cli::try_parse_from([
            "netbox-helper", "add-interface", "--device-id", "1", "--name", "eth0", "--type", "1000base-t",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::AddInterface { interface_type: Some(ref t), .. } if t == "1000base-t"
        ));
    }
}
