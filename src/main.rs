//! NVMe-oF Fabric Zoning CLI
//!
//! Drives the zoning workflow against a discovery controller: provision a
//! zone group connecting every host to every known subsystem, tear one down,
//! deactivate the currently enforced group, or inspect the fabric inventory.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nvmeof_zoning::{
    ActivationController, InstanceManager, InventoryReader, RestClient, RestConfig, Result,
    ZoneDbKind, ZoningOrchestrator, ZoningRepository,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Fabric zoning client for NVMe-oF discovery controllers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Controller address (IP or hostname)
    #[arg(long, env = "ZONING_ADDRESS")]
    address: String,

    /// Basic-auth username
    #[arg(long, env = "ZONING_USERNAME", default_value = "admin")]
    username: String,

    /// Basic-auth password
    #[arg(long, env = "ZONING_PASSWORD")]
    password: String,

    /// Verify the controller's TLS certificate
    #[arg(long, env = "ZONING_VERIFY_TLS")]
    verify_tls: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "ZONING_TIMEOUT", default_value = "30")]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Provision and activate a zone group for the full fabric inventory
    Provision {
        /// Controller instance identifier
        #[arg(long, default_value = "1")]
        instance: u32,
        /// Zone group name
        #[arg(long)]
        group: String,
    },
    /// Tear down a staged zone group (members, zones, then the group)
    Dismantle {
        #[arg(long, default_value = "1")]
        instance: u32,
        /// Zone group name
        #[arg(long)]
        group: String,
    },
    /// Deactivate whatever zone group is currently enforced
    Deactivate {
        #[arg(long, default_value = "1")]
        instance: u32,
    },
    /// Show registered hosts and subsystems
    Inventory {
        #[arg(long, default_value = "1")]
        instance: u32,
    },
    /// Show configured controller instances and zone databases
    Instances,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = RestConfig {
        address: args.address.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        accept_invalid_certs: !args.verify_tls,
        timeout: Duration::from_secs(args.timeout_secs),
    };
    let channel = Arc::new(RestClient::new(config)?);

    match args.command {
        Command::Provision { instance, group } => {
            let orchestrator = ZoningOrchestrator::new(channel);
            let report = orchestrator.provision_zone_group(instance, &group).await?;
            println!("Zone group activated: {}", report.group_id);
            println!(
                "  {} zones, {} host members, {} subsystem members",
                report.zones.len(),
                report.host_members,
                report.subsystem_members
            );
        }
        Command::Dismantle { instance, group } => {
            let orchestrator = ZoningOrchestrator::new(channel);
            orchestrator.dismantle_zone_group(instance, &group).await?;
            println!("Zone group dismantled: {}", group);
        }
        Command::Deactivate { instance } => {
            let activation = ActivationController::new(channel);
            let demoted = activation.deactivate_current(instance).await?;
            println!("Deactivated: {}", demoted);
        }
        Command::Inventory { instance } => {
            let inventory = InventoryReader::new(channel);
            let hosts = inventory.list_hosts(instance).await?;
            let subsystems = inventory.list_subsystems(instance).await?;

            println!("Hosts ({}):", hosts.len());
            for host in &hosts {
                println!("  {} @ {}", host.nqn, host.transport_address);
            }
            println!("Subsystems ({}):", subsystems.len());
            for subsystem in &subsystems {
                println!("  {}", subsystem.nqn);
            }
        }
        Command::Instances => {
            let manager = InstanceManager::new(channel.clone());
            let repository = ZoningRepository::new(channel);

            for instance in manager.list_instances().await? {
                println!(
                    "Instance {} ({:?}): interfaces {:?}",
                    instance.id, instance.cdc_admin_state, instance.interfaces
                );
                if let Ok(id) = instance.id.parse::<u32>() {
                    for kind in [ZoneDbKind::Config, ZoneDbKind::Active] {
                        let db = repository.zone_database(id, kind).await?;
                        println!("  {} DB: {} zone group(s)", kind, db.group_count);
                    }
                }
            }
        }
    }

    info!("Done");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
