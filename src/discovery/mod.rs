//! Discovery-side collections of the controller
//!
//! - [`inventory`]: read-only snapshots of registered hosts and subsystems
//! - [`instances`]: controller instance managers and direct discovery
//!   controller registration

pub mod instances;
pub mod inventory;

pub use instances::InstanceManager;
pub use inventory::InventoryReader;
