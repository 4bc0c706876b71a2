//! NVMe-oF Fabric Zoning Client
//!
//! A client library and provisioning orchestrator for the fabric zoning
//! surface of an NVMe-over-Fabrics discovery controller: hosts and storage
//! subsystems are grouped into named zones inside named zone groups, staged
//! in a pending `config` database, and atomically promoted into the enforced
//! `active` database.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────────┐     ┌──────────────────┐
//! │ Inventory Reader │ ──> │ Zoning Orchestrator  │ ──> │ Zoning           │
//! │ (hosts/subsys)   │     │ (provisioning run)   │     │ Repository       │
//! └──────────────────┘     └──────────┬───────────┘     │ (config DB CRUD) │
//!                                     │                 └────────┬─────────┘
//!                                     v                          │
//!                          ┌──────────────────────┐              │
//!                          │ Activation Controller│ <────────────┘
//!                          │ (config -> active)   │
//!                          └──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`zoning`]: identifier codec, repository, activation, orchestrator
//! - [`discovery`]: inventory reader, instance and DDC management
//! - [`transport`]: the REST channel port and its reqwest implementation
//! - [`domain`]: typed entities decoded from controller payloads
//! - [`error`]: error types and handling

pub mod discovery;
pub mod domain;
pub mod error;
pub mod transport;
pub mod zoning;

// Re-export commonly used types
pub use discovery::{InstanceManager, InventoryReader};
pub use domain::{
    AdminState, Host, Instance, MemberRole, Subsystem, Zone, ZoneDatabase, ZoneDbKind, ZoneMember,
};
pub use error::{Error, ProvisionStep, Result};
pub use transport::{RestChannel, RestClient, RestConfig};
pub use zoning::{
    ActivationController, ProvisionReport, ZoneGroupId, ZoneId, ZoneMemberId, ZoningOrchestrator,
    ZoningRepository,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
