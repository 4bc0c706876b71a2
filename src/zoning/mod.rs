//! Fabric zoning: staging, activation, and provisioning
//!
//! Zoning is edited in the `config` database and promoted as a unit into the
//! `active` database:
//!
//! - [`ident`]: the colon-delimited hierarchical identifier codec
//! - [`repository`]: CRUD over zone groups, zones, and zone members
//! - [`activation`]: promotion of a staged zone group into enforcement
//! - [`orchestrator`]: the host-to-all-subsystems provisioning workflow

pub mod activation;
pub mod ident;
pub mod orchestrator;
pub mod repository;

pub use activation::ActivationController;
pub use ident::{ZoneGroupId, ZoneId, ZoneMemberId};
pub use orchestrator::{ProvisionReport, ZoningOrchestrator};
pub use repository::ZoningRepository;

use crate::domain::ZoneDbKind;

// OID builders for the controller's zoning resources. Paths reproduce the
// controller's Redfish layout exactly; ids are embedded verbatim.

pub(crate) fn zone_db_oid(instance: u32, kind: ZoneDbKind) -> String {
    match kind {
        ZoneDbKind::Config => format!("SFSS/{}/ZoneDBs('config')?$source=config", instance),
        ZoneDbKind::Active => format!("SFSS/{}/ZoneDBs('active')", instance),
    }
}

pub(crate) fn zone_groups_oid(instance: u32) -> String {
    format!("SFSS/{}/ZoneDBs('config')/ZoneGroups", instance)
}

pub(crate) fn zone_group_oid(instance: u32, group_id: &ZoneGroupId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})?$source=config&$expand=ZoneGroups",
        instance, group_id
    )
}

pub(crate) fn zones_oid(instance: u32, group_id: &ZoneGroupId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones",
        instance, group_id
    )
}

pub(crate) fn zones_list_oid(instance: u32, group_id: &ZoneGroupId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones?$source=config&$expand=Zones",
        instance, group_id
    )
}

pub(crate) fn zone_oid(instance: u32, group_id: &ZoneGroupId, zone_id: &ZoneId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones({})",
        instance, group_id, zone_id
    )
}

pub(crate) fn zone_members_oid(instance: u32, group_id: &ZoneGroupId, zone_id: &ZoneId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones({})/ZoneMembers",
        instance, group_id, zone_id
    )
}

pub(crate) fn zone_members_list_oid(
    instance: u32,
    group_id: &ZoneGroupId,
    zone_id: &ZoneId,
) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones({})/ZoneMembers?$source=config&$expand=ZoneMembers",
        instance, group_id, zone_id
    )
}

pub(crate) fn zone_member_oid(
    instance: u32,
    group_id: &ZoneGroupId,
    zone_id: &ZoneId,
    member_id: &ZoneMemberId,
) -> String {
    format!(
        "SFSS/{}/ZoneDBs('config')/ZoneGroups({})/Zones({})/ZoneMembers('{}')",
        instance, group_id, zone_id, member_id
    )
}

pub(crate) fn activation_oid(instance: u32, kind: ZoneDbKind, group_id: &ZoneGroupId) -> String {
    format!(
        "SFSS/{}/ZoneDBs('{}')/ZoneGroups('{}')",
        instance,
        kind.as_str(),
        group_id
    )
}
