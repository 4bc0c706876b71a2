//! Inventory reader
//!
//! Read-only queries against the hosts and subsystems collections. Results
//! are eventually-consistent snapshots with no ordering guarantee across
//! calls; an empty successful result means nothing is registered yet, and a
//! transport-level failure also yields an empty list (logged), so a
//! failure-sensitive caller must check connectivity separately.

use crate::domain::{decode_entity, Host, Subsystem};
use crate::error::Result;
use crate::transport::{fetch_list, RestChannel};
use std::sync::Arc;

fn hosts_oid(instance: u32) -> String {
    format!("SFSS/{}/Hosts?$expand=Hosts", instance)
}

fn subsystems_oid(instance: u32) -> String {
    format!("SFSS/{}/Subsystems?$expand=Subsystems", instance)
}

/// Read-only view of the fabric inventory
pub struct InventoryReader {
    channel: Arc<dyn RestChannel>,
}

impl InventoryReader {
    /// Create a new inventory reader over the given channel
    pub fn new(channel: Arc<dyn RestChannel>) -> Self {
        Self { channel }
    }

    /// Snapshot of the hosts registered with an instance
    pub async fn list_hosts(&self, instance: u32) -> Result<Vec<Host>> {
        let oid = hosts_oid(instance);
        let items = fetch_list(self.channel.as_ref(), &oid, "Hosts").await;

        items
            .into_iter()
            .map(|item| decode_entity(&oid, item))
            .collect()
    }

    /// Snapshot of the subsystems registered with an instance
    pub async fn list_subsystems(&self, instance: u32) -> Result<Vec<Subsystem>> {
        let oid = subsystems_oid(instance);
        let items = fetch_list(self.channel.as_ref(), &oid, "Subsystems").await;

        items
            .into_iter()
            .map(|item| decode_entity(&oid, item))
            .collect()
    }
}
