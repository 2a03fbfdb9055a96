//! NetBox helper CLI
//!
//! Runs one inventory helper per invocation and prints the result on stdout.
//! Connection settings come from `NETBOX_URL`, `NETBOX_TOKEN`,
//! `NETBOX_VERIFY_TLS` and `NETBOX_TIMEOUT_SECS`, or the matching flags.

mod cli;

use anyhow::Context;
use clap::Parser;
use netbox_helpers::{HelperConfig, HelperError, NetBoxHelper, NewPrefix};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err.downcast_ref::<HelperError>().map_or("error", HelperError::kind);
            eprintln!("{}: {:#}", kind, err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Environment configuration with command-line overrides applied
fn load_config(global: &GlobalOpts) -> anyhow::Result<HelperConfig> {
    let lookup = |name: &str| -> Option<String> {
        let flag = match name {
            "NETBOX_URL" => global.url.clone(),
            "NETBOX_TOKEN" => global.token.clone(),
            "NETBOX_VERIFY_TLS" => global.verify_tls.map(|verify| verify.to_string()),
            "NETBOX_TIMEOUT_SECS" => global.timeout_secs.map(|secs| secs.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(name).ok())
    };

    HelperConfig::from_lookup(lookup).context("Failed to load NetBox configuration")
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let global = cli.global;

    // Pure computation, no connection needed
    let command = match cli.command {
        Command::NextFree { used, min, max } => {
            let next = netbox_helpers::find_next_free_number(used, min, max)
                .ok_or_else(|| HelperError::Exhausted(format!("No free number in [{}, {})", min, max)))?;
            println!("{}", next);
            return Ok(());
        }
        command => command,
    };

    let config = load_config(&global)?;
    info!("Using NetBox at {} (verify TLS: {})", config.base_url, config.verify_tls);
    let helper = NetBoxHelper::from_config(&config)?;

    debug!(command = ?command, "dispatching command");
    match command {
        // Answered above without a connection
        Command::NextFree { .. } => {}

        Command::NextPrefix { vrf_id, container, length } => {
            let prefix = helper
                .get_next_prefix(vrf_id, &container, length)
                .await
                .with_context(|| format!("Failed to get next /{} in {}", length, container))?;
            println!("{}", prefix);
        }

        Command::AddInterface { device_id, name, interface_type } => {
            let interface = helper
                .add_interface_to_device(device_id, &name, interface_type.as_deref())
                .await
                .with_context(|| format!("Failed to add interface '{}' to device {}", name, device_id))?;
            if global.json {
                print_json(&interface)?;
            } else {
                println!("{}\t{}", interface.id, interface.name);
            }
        }

        Command::AddIp { interface_id, tenant_id, vrf_id, address } => {
            let ip = helper
                .add_ip_address_to_interface(interface_id, tenant_id, vrf_id, &address)
                .await
                .with_context(|| format!("Failed to add {} to interface {}", address, interface_id))?;
            if global.json {
                print_json(&ip)?;
            } else {
                println!("{}\t{}", ip.id, ip.address);
            }
        }

        Command::PrimaryIp { device_id, address } => {
            let ip = helper
                .add_primary_ip_to_mgmt_interface(device_id, &address)
                .await
                .with_context(|| format!("Failed to set primary IP {} on device {}", address, device_id))?;
            if global.json {
                print_json(&ip)?;
            } else {
                println!("{}\t{}", ip.id, ip.address);
            }
        }

        Command::Regions => {
            for region in helper.get_regions_list().await? {
                println!("{}", region);
            }
        }

        Command::DeviceModels { manufacturer } => {
            for model in helper.get_device_model_list(&manufacturer).await? {
                println!("{}", model);
            }
        }

        Command::NextAsn => {
            println!("{}", helper.get_next_asns().await?);
        }

        Command::CreatePrefix { supernet, vrf_id, length, tenant_id, site_id, role_id, description } => {
            let new_prefix = NewPrefix {
                tenant_id,
                site_id,
                vrf_id,
                supernet,
                description,
                length,
                role_id,
            };
            let prefix = helper
                .create_next_prefix(&new_prefix)
                .await
                .with_context(|| format!("Failed to create /{} in {}", new_prefix.length, new_prefix.supernet))?;
            if global.json {
                print_json(&prefix)?;
            } else {
                println!("{}\t{}", prefix.id, prefix.prefix);
            }
        }

        Command::Check => {
            helper.validate_token().await?;
            println!("NetBox at {} accepted the token", helper.base_url());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(args: &[&str]) -> GlobalOpts {
        let argv = ["netbox-helper", "regions", "--token", "abc"].into_iter().chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn test_verify_tls_flag_overrides_config() {
        let config = load_config(&global(&["--verify-tls", "false"])).unwrap();
        assert!(!config.verify_tls);

        let config = load_config(&global(&["--verify-tls"])).unwrap();
        assert!(config.verify_tls);
    }

    #[tokio::test]
    async fn test_next_prefix_failure_context_is_neutral() {
        // Nothing listens on port 1, so the lookup fails before any allocation
        let cli = Cli::try_parse_from([
            "netbox-helper", "next-prefix", "--vrf-id", "1", "--container", "10.0.0.0/16", "--length", "26",
            "--url", "http://127.0.0.1:1", "--token", "abc", "--timeout-secs", "2",
        ])
        .unwrap();

        let err = run(cli).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get next /26 in 10.0.0.0/16");
        assert_eq!(err.downcast_ref::<HelperError>().map(HelperError::kind), Some("transport"));
    }
}
