//! Zoning orchestrator
//!
//! Builds the full group -> zone -> member graph for one provisioning run and
//! then activates the group as a unit. Repository calls are strictly
//! sequential because each step consumes the id the previous step returned;
//! the first failure aborts the run with no rollback, leaving the config
//! database partially populated for the caller to resolve.

use crate::discovery::InventoryReader;
use crate::domain::MemberRole;
use crate::error::{ProvisionStep, Result};
use crate::transport::RestChannel;
use crate::zoning::activation::ActivationController;
use crate::zoning::ident::{ZoneGroupId, ZoneId, ZoneMemberId};
use crate::zoning::repository::ZoningRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a completed provisioning run
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub group_id: ZoneGroupId,
    pub zones: Vec<ZoneId>,
    pub host_members: usize,
    pub subsystem_members: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// Coordinates inventory, repository, and activation for provisioning runs
pub struct ZoningOrchestrator {
    inventory: InventoryReader,
    repository: ZoningRepository,
    activation: ActivationController,
}

impl ZoningOrchestrator {
    /// Create a new orchestrator with all components sharing one channel
    pub fn new(channel: Arc<dyn RestChannel>) -> Self {
        Self {
            inventory: InventoryReader::new(channel.clone()),
            repository: ZoningRepository::new(channel.clone()),
            activation: ActivationController::new(channel),
        }
    }

    pub fn repository(&self) -> &ZoningRepository {
        &self.repository
    }

    pub fn activation(&self) -> &ActivationController {
        &self.activation
    }

    pub fn inventory(&self) -> &InventoryReader {
        &self.inventory
    }

    /// Provision a zone group connecting every host to every known subsystem.
    ///
    /// One zone is created per host, named after the host's transport
    /// address; the host joins its own zone and every subsystem in inventory
    /// joins every zone. The group is activated once, as the final step.
    /// Failures abort the run and name the step they occurred in; already
    /// created zones and members are left behind.
    pub async fn provision_zone_group(
        &self,
        instance: u32,
        group_name: &str,
    ) -> Result<ProvisionReport> {
        let started_at = chrono::Utc::now();
        info!(
            "Provisioning zone group {} on instance {}",
            group_name, instance
        );

        let group_id = self
            .repository
            .create_zone_group(instance, group_name)
            .await
            .map_err(|e| e.at_step(ProvisionStep::Group))?;

        // One inventory snapshot for the whole run
        let hosts = self.inventory.list_hosts(instance).await?;
        let subsystems = self.inventory.list_subsystems(instance).await?;
        if hosts.is_empty() {
            warn!("No hosts registered on instance {}", instance);
        }

        let mut zones = Vec::with_capacity(hosts.len());
        let mut host_members = 0;
        let mut subsystem_members = 0;

        for host in &hosts {
            // Zone name collisions between hosts sharing a transport address
            // are not deduplicated; the create fails and the run aborts.
            let zone_id = self
                .repository
                .create_zone(instance, &group_id, &host.transport_address)
                .await
                .map_err(|e| e.at_step(ProvisionStep::Zone))?;

            self.repository
                .add_zone_member(instance, &group_id, &zone_id, &host.id, MemberRole::Host)
                .await
                .map_err(|e| e.at_step(ProvisionStep::HostMember))?;
            host_members += 1;

            // Intended connectivity policy: every zone admits every known
            // subsystem, regardless of the originating host.
            for subsystem in &subsystems {
                self.repository
                    .add_zone_member(
                        instance,
                        &group_id,
                        &zone_id,
                        &subsystem.id,
                        MemberRole::Subsystem,
                    )
                    .await
                    .map_err(|e| e.at_step(ProvisionStep::SubsystemMember))?;
                subsystem_members += 1;
            }

            zones.push(zone_id);
        }

        self.activation
            .activate(instance, &group_id)
            .await
            .map_err(|e| e.at_step(ProvisionStep::Activation))?;

        info!(
            "Provisioned zone group {}: {} zones, {} host members, {} subsystem members",
            group_id,
            zones.len(),
            host_members,
            subsystem_members
        );

        Ok(ProvisionReport {
            group_id,
            zones,
            host_members,
            subsystem_members,
            started_at,
            finished_at: chrono::Utc::now(),
        })
    }

    /// Tear down a config-database zone group bottom-up: members, then
    /// zones, then the group itself.
    pub async fn dismantle_zone_group(&self, instance: u32, group_name: &str) -> Result<()> {
        let group_id = self.repository.find_zone_group_id(instance, group_name).await?;
        let zones = self.repository.zones(instance, &group_id).await?;

        for zone in &zones {
            let zone_id = ZoneId::from_raw(zone.id.clone());
            let members = self
                .repository
                .zone_members(instance, &group_id, &zone_id)
                .await?;
            for member in members {
                let member_id = ZoneMemberId::from_raw(member.id);
                self.repository
                    .delete_zone_member(instance, &group_id, &zone_id, &member_id)
                    .await?;
            }
            self.repository.delete_zone(instance, &group_id, &zone_id).await?;
        }

        self.repository.delete_zone_group(instance, &group_id).await?;
        info!("Dismantled zone group {}", group_id);
        Ok(())
    }
}
