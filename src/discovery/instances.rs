//! Controller instance management
//!
//! Instance managers bind a discovery-controller instance to its network
//! interfaces; direct discovery controllers (DDCs) are registered against an
//! instance so the controller can pull their discovery log.

use crate::domain::{decode_entity, DdcRef, Instance};
use crate::error::{Error, Result};
use crate::transport::{fetch_list, RestChannel};
use serde_json::json;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

const INSTANCES_OID: &str = "SFSSApp/CDCInstanceManagers?$source=config&$expand=CDCInstanceManagers";

fn instance_oid(instance: u32) -> String {
    format!("SFSSApp/CDCInstanceManagers('{}')", instance)
}

fn ddcs_oid(instance: u32) -> String {
    format!("SFSS/{}/DDCs", instance)
}

fn ddc_oid(instance: u32, ddc_id: &str) -> String {
    format!("SFSS/{}/DDCs({})", instance, ddc_id)
}

/// Management surface for controller instances and DDC registration
pub struct InstanceManager {
    channel: Arc<dyn RestChannel>,
}

impl InstanceManager {
    /// Create a new instance manager over the given channel
    pub fn new(channel: Arc<dyn RestChannel>) -> Self {
        Self { channel }
    }

    // =========================================================================
    // Instances
    // =========================================================================

    /// List the configured controller instances
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        let items = fetch_list(self.channel.as_ref(), INSTANCES_OID, "CDCInstanceManagers").await;

        items
            .into_iter()
            .map(|item| decode_entity(INSTANCES_OID, item))
            .collect()
    }

    /// Fetch one controller instance
    pub async fn instance(&self, instance: u32) -> Result<Instance> {
        let oid = instance_oid(instance);
        let payload = self.channel.get(&oid).await?;
        decode_entity(&oid, payload)
    }

    /// Create a controller instance bound to the given interfaces.
    ///
    /// Both the discovery service and the controller itself are enabled.
    pub async fn create_instance(&self, instance: u32, interfaces: &[String]) -> Result<Instance> {
        let oid = instance_oid(instance);
        let body = json!({
            "InstanceIdentifier": instance,
            "Interfaces": interfaces,
            "CDCAdminState": "Enable",
            "DiscoverySvcAdminState": "Enable",
        });
        let payload = self.channel.put(&oid, body).await?;

        info!("Created controller instance {}", instance);
        decode_entity(&oid, payload)
    }

    // =========================================================================
    // Direct Discovery Controllers
    // =========================================================================

    /// List the DDCs registered with an instance
    pub async fn list_ddcs(&self, instance: u32) -> Result<Vec<DdcRef>> {
        let oid = ddcs_oid(instance);
        let items = fetch_list(self.channel.as_ref(), &oid, "DDCs").await;

        items
            .into_iter()
            .map(|item| decode_entity(&oid, item))
            .collect()
    }

    /// Register a DDC for pull-mode discovery.
    ///
    /// The address family is derived from the parsed transport address.
    pub async fn register_ddc(
        &self,
        instance: u32,
        transport_type: &str,
        address: &str,
        port: u16,
        activate: bool,
    ) -> Result<()> {
        let ip: IpAddr = address.parse().map_err(|_| {
            Error::Configuration(format!("invalid transport address: {}", address))
        })?;
        let family = if ip.is_ipv4() { "IPV4" } else { "IPV6" };

        let oid = ddcs_oid(instance);
        let body = json!({
            "TransportType": transport_type,
            "TransportAddress": address,
            "PortId": port,
            "TransportAddressFamily": family,
            "Activate": activate,
        });
        self.channel.post(&oid, body).await?;

        info!("Registered DDC {}:{} on instance {}", address, port, instance);
        Ok(())
    }

    /// Remove a registered DDC
    pub async fn delete_ddc(&self, instance: u32, ddc_id: &str) -> Result<()> {
        let oid = ddc_oid(instance, ddc_id);
        self.channel.delete(&oid).await?;

        info!("Deleted DDC {} on instance {}", ddc_id, instance);
        Ok(())
    }
}
