//! Activation controller
//!
//! A zone group exists staged in the config database until it is promoted
//! into the active database, the single transition that makes zoning
//! enforceable. There is no reverse transition for the same id: deactivation
//! demotes whatever group is currently active, resolved fresh at call time.

use crate::domain::{decode_entity, ZoneDbKind};
use crate::error::{Error, Result};
use crate::transport::RestChannel;
use crate::zoning::ident::ZoneGroupId;
use crate::zoning::{activation_oid, zone_db_oid};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ActiveDbWire {
    #[serde(rename = "ZoneGroups", default)]
    groups: Vec<String>,
}

/// Promotes staged zone groups into enforcement and back out
pub struct ActivationController {
    channel: Arc<dyn RestChannel>,
}

impl ActivationController {
    /// Create a new activation controller over the given channel
    pub fn new(channel: Arc<dyn RestChannel>) -> Self {
        Self { channel }
    }

    /// Promote a config-database zone group into the active database.
    ///
    /// Succeeds only if the controller reports success; never retried here.
    pub async fn activate(&self, instance: u32, group_id: &ZoneGroupId) -> Result<()> {
        let oid = activation_oid(instance, ZoneDbKind::Config, group_id);
        let body = json!({ "ActivateStatus": "Activate" });
        self.channel.put(&oid, body).await?;

        info!("Activated zone group {}", group_id);
        Ok(())
    }

    /// Resolve the currently active zone group.
    ///
    /// The active group is a singleton concept; callers must resolve it
    /// immediately before acting on it rather than reusing an id from an
    /// earlier activation.
    pub async fn active_zone_group(&self, instance: u32) -> Result<ZoneGroupId> {
        let oid = zone_db_oid(instance, ZoneDbKind::Active);
        let payload = self.channel.get(&oid).await?;
        let wire: ActiveDbWire = decode_entity(&oid, payload)?;

        wire.groups
            .into_iter()
            .next()
            .map(ZoneGroupId::from_raw)
            .ok_or_else(|| Error::NotFound {
                kind: "ActiveZoneGroup".into(),
                name: format!("instance {}", instance),
            })
    }

    /// Demote whatever zone group is currently active.
    ///
    /// Returns the id that was demoted.
    pub async fn deactivate_current(&self, instance: u32) -> Result<ZoneGroupId> {
        let active = self.active_zone_group(instance).await?;

        let oid = activation_oid(instance, ZoneDbKind::Active, &active);
        let body = json!({ "ActivateStatus": "DeActivate" });
        self.channel.put(&oid, body).await?;

        info!("Deactivated zone group {}", active);
        Ok(active)
    }
}
