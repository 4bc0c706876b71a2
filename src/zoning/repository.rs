//! Zoning repository
//!
//! CRUD over zone groups, zones, and zone members in the config database.
//! Writes are addressed by previously-returned opaque ids; lookup-by-name is
//! a linear scan over decoded ids, kept as an explicit pure function so it
//! can be unit-tested without a transport.

use crate::domain::{decode_entity, MemberRole, Zone, ZoneDatabase, ZoneDbKind, ZoneMember};
use crate::error::{Error, Result};
use crate::transport::{extract_eid, fetch_list, RestChannel};
use crate::zoning::ident::{ensure_valid_name, extract_name, ZoneGroupId, ZoneId, ZoneMemberId};
use crate::zoning::{
    zone_db_oid, zone_group_oid, zone_groups_oid, zone_member_oid, zone_members_list_oid,
    zone_members_oid, zone_oid, zones_list_oid, zones_oid,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Wire shape of a zone database resource
#[derive(Debug, Deserialize)]
struct ZoneDbWire {
    #[serde(rename = "NumberZoneGroups", default)]
    group_count: u32,
    #[serde(rename = "ZoneGroups", default)]
    groups: Vec<String>,
}

/// Match a zone group by its decoded name field; exact match, first wins.
///
/// Malformed ids are skipped rather than failing the scan: the scan answers
/// "is there a group named X", not "is every id well-formed".
pub fn match_group_by_name<'a>(ids: &'a [ZoneGroupId], name: &str) -> Option<&'a ZoneGroupId> {
    ids.iter()
        .find(|id| extract_name(id.as_str()).map(|n| n == name).unwrap_or(false))
}

/// Repository for zoning CRUD against one controller
pub struct ZoningRepository {
    channel: Arc<dyn RestChannel>,
}

impl ZoningRepository {
    /// Create a new repository over the given channel
    pub fn new(channel: Arc<dyn RestChannel>) -> Self {
        Self { channel }
    }

    // =========================================================================
    // Zone Databases
    // =========================================================================

    /// Fetch the decoded view of one zone database
    pub async fn zone_database(&self, instance: u32, kind: ZoneDbKind) -> Result<ZoneDatabase> {
        let oid = zone_db_oid(instance, kind);
        let payload = self.channel.get(&oid).await?;
        let wire: ZoneDbWire = decode_entity(&oid, payload)?;

        Ok(ZoneDatabase {
            kind,
            group_count: wire.group_count,
            groups: wire.groups.into_iter().map(ZoneGroupId::from_raw).collect(),
        })
    }

    /// List the zone group ids in the config database
    pub async fn zone_group_ids(&self, instance: u32) -> Result<Vec<ZoneGroupId>> {
        let oid = zone_db_oid(instance, ZoneDbKind::Config);
        let items = fetch_list(self.channel.as_ref(), &oid, "ZoneGroups").await;

        items
            .into_iter()
            .map(|item| {
                item.as_str()
                    .map(ZoneGroupId::from_raw)
                    .ok_or_else(|| Error::Decode {
                        oid: oid.clone(),
                        reason: "zone group id is not a string".into(),
                    })
            })
            .collect()
    }

    // =========================================================================
    // Zone Groups
    // =========================================================================

    /// Find a config-database zone group id by name
    pub async fn find_zone_group_id(&self, instance: u32, name: &str) -> Result<ZoneGroupId> {
        let ids = self.zone_group_ids(instance).await?;
        match_group_by_name(&ids, name)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: "ZoneGroup".into(),
                name: name.to_string(),
            })
    }

    /// Create an empty zone group in the config database
    pub async fn create_zone_group(&self, instance: u32, name: &str) -> Result<ZoneGroupId> {
        ensure_valid_name(name)?;

        let existing = self.zone_group_ids(instance).await?;
        if match_group_by_name(&existing, name).is_some() {
            return Err(Error::Conflict {
                kind: "ZoneGroup".into(),
                name: name.to_string(),
            });
        }

        let oid = zone_groups_oid(instance);
        let body = json!({
            "ZoneDBType": "config",
            "ZoneGroupName": name,
        });
        let reply = self.channel.post(&oid, body).await?;
        let id = ZoneGroupId::from_raw(extract_eid(&oid, &reply)?);

        info!("Created zone group {} -> {}", name, id);
        Ok(id)
    }

    /// Delete a zone group from the config database
    pub async fn delete_zone_group(&self, instance: u32, group_id: &ZoneGroupId) -> Result<()> {
        let oid = zone_group_oid(instance, group_id);
        self.channel.delete(&oid).await?;
        info!("Deleted zone group {}", group_id);
        Ok(())
    }

    // =========================================================================
    // Zones
    // =========================================================================

    /// List the zones of a zone group
    pub async fn zones(&self, instance: u32, group_id: &ZoneGroupId) -> Result<Vec<Zone>> {
        let oid = zones_list_oid(instance, group_id);
        let items = fetch_list(self.channel.as_ref(), &oid, "Zones").await;

        items
            .into_iter()
            .map(|item| decode_entity(&oid, item))
            .collect()
    }

    /// Find a zone id by name within one zone group
    pub async fn find_zone_id(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        name: &str,
    ) -> Result<ZoneId> {
        let zones = self.zones(instance, group_id).await?;
        zones
            .iter()
            .find(|zone| zone.name == name)
            .map(|zone| ZoneId::from_raw(zone.id.clone()))
            .ok_or_else(|| Error::NotFound {
                kind: "Zone".into(),
                name: name.to_string(),
            })
    }

    /// Create a zone inside a zone group
    pub async fn create_zone(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        name: &str,
    ) -> Result<ZoneId> {
        ensure_valid_name(name)?;

        let oid = zones_oid(instance, group_id);
        let body = json!({ "ZoneName": name });
        let reply = self.channel.post(&oid, body).await?;
        let id = ZoneId::from_raw(extract_eid(&oid, &reply)?);

        debug!("Created zone {} -> {}", name, id);
        Ok(id)
    }

    /// Delete a zone from a zone group
    pub async fn delete_zone(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        zone_id: &ZoneId,
    ) -> Result<()> {
        let oid = zone_oid(instance, group_id, zone_id);
        self.channel.delete(&oid).await?;
        debug!("Deleted zone {}", zone_id);
        Ok(())
    }

    // =========================================================================
    // Zone Members
    // =========================================================================

    /// Add a member to a zone with a fixed role.
    ///
    /// The caller classifies the member; no role inference happens here, and
    /// re-adding an existing member is a distinct create, not an update.
    pub async fn add_zone_member(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        zone_id: &ZoneId,
        member_ref: &str,
        role: MemberRole,
    ) -> Result<ZoneMemberId> {
        let oid = zone_members_oid(instance, group_id, zone_id);
        let body = json!({
            "ZoneMemberId": member_ref,
            "ZoneMemberType": "FullQualifiedName",
            "Role": role.as_str(),
        });
        let reply = self.channel.post(&oid, body).await?;
        let id = ZoneMemberId::from_raw(extract_eid(&oid, &reply)?);

        debug!("Added {} member {} to {}", role, member_ref, zone_id);
        Ok(id)
    }

    /// List the members of a zone
    pub async fn zone_members(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        zone_id: &ZoneId,
    ) -> Result<Vec<ZoneMember>> {
        let oid = zone_members_list_oid(instance, group_id, zone_id);
        let items = fetch_list(self.channel.as_ref(), &oid, "ZoneMembers").await;

        items
            .into_iter()
            .map(|item| decode_entity(&oid, item))
            .collect()
    }

    /// Delete a member from a zone
    pub async fn delete_zone_member(
        &self,
        instance: u32,
        group_id: &ZoneGroupId,
        zone_id: &ZoneId,
        member_id: &ZoneMemberId,
    ) -> Result<()> {
        let oid = zone_member_oid(instance, group_id, zone_id, member_id);
        self.channel.delete(&oid).await?;
        debug!("Deleted zone member {}", member_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeChannel;
    use assert_matches::assert_matches;
    use serde_json::json;

    const CONFIG_DB: &str = "SFSS/1/ZoneDBs('config')?$source=config";
    const GROUPS: &str = "SFSS/1/ZoneDBs('config')/ZoneGroups";
    const STARFLEET: &str = "config:Starfleet:nqn.1988-11.com.dell:SFSS:1:20220523215843e8";
    const KLINGONS: &str = "config:Klingons:nqn.1988-11.com.dell:SFSS:1:20220523215843e8";

    fn repository(channel: Arc<FakeChannel>) -> ZoningRepository {
        ZoningRepository::new(channel)
    }

    #[test]
    fn test_match_group_by_name() {
        let ids = vec![
            ZoneGroupId::from_raw(KLINGONS),
            ZoneGroupId::from_raw("malformed"),
            ZoneGroupId::from_raw(STARFLEET),
        ];

        let hit = match_group_by_name(&ids, "Starfleet").unwrap();
        assert_eq!(hit.as_str(), STARFLEET);

        // Exact and case-sensitive only
        assert!(match_group_by_name(&ids, "starfleet").is_none());
        assert!(match_group_by_name(&ids, "Romulans").is_none());
    }

    #[tokio::test]
    async fn test_find_zone_group_not_found_when_empty() {
        let channel = Arc::new(FakeChannel::new());
        channel.on_get(CONFIG_DB, json!({ "NumberZoneGroups": 0, "ZoneGroups": [] }));

        let repo = repository(channel);
        let result = repo.find_zone_group_id(1, "Starfleet").await;
        assert_matches!(result, Err(Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_zone_group_among_decoys() {
        let channel = Arc::new(FakeChannel::new());
        channel.on_get(
            CONFIG_DB,
            json!({ "NumberZoneGroups": 2, "ZoneGroups": [KLINGONS, STARFLEET] }),
        );

        let repo = repository(channel);
        let id = repo.find_zone_group_id(1, "Starfleet").await.unwrap();
        assert_eq!(id.as_str(), STARFLEET);
    }

    #[tokio::test]
    async fn test_create_zone_group_returns_eid() {
        let channel = Arc::new(FakeChannel::new());
        channel.on_get(CONFIG_DB, json!({ "ZoneGroups": [KLINGONS] }));
        channel.on_post(GROUPS, json!({ "EId": STARFLEET }));

        let repo = repository(channel);
        let id = repo.create_zone_group(1, "Starfleet").await.unwrap();
        assert_eq!(id.as_str(), STARFLEET);
    }

    #[tokio::test]
    async fn test_create_zone_group_conflict_on_existing_name() {
        let channel = Arc::new(FakeChannel::new());
        channel.on_get(CONFIG_DB, json!({ "ZoneGroups": [STARFLEET] }));

        let repo = repository(channel);
        let result = repo.create_zone_group(1, "Starfleet").await;
        assert_matches!(result, Err(Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_zone_group_rejects_delimiter_in_name() {
        let repo = repository(Arc::new(FakeChannel::new()));
        let result = repo.create_zone_group(1, "Star:fleet").await;
        assert_matches!(result, Err(Error::InvalidIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_find_zone_id_scoped_to_group() {
        let channel = Arc::new(FakeChannel::new());
        let group = ZoneGroupId::from_raw(STARFLEET);
        let oid = zones_list_oid(1, &group);
        channel.on_get(
            &oid,
            json!({ "Zones": [
                { "ZoneName": "voyager", "ZoneId": format!("{}:voyager", STARFLEET) },
                { "ZoneName": "enterprise", "ZoneId": format!("{}:enterprise", STARFLEET),
                  "numberZoneMembers": "4" },
            ]}),
        );

        let repo = repository(channel);
        let zone_id = repo.find_zone_id(1, &group, "enterprise").await.unwrap();
        assert_eq!(zone_id.as_str(), format!("{}:enterprise", STARFLEET));

        let missing = repo.find_zone_id(1, &group, "defiant").await;
        assert_matches!(missing, Err(Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_zone_member_returns_eid() {
        let channel = Arc::new(FakeChannel::new());
        let group = ZoneGroupId::from_raw(STARFLEET);
        let zone = ZoneId::from_raw(format!("{}:enterprise", STARFLEET));
        let member_ref = "nqn.2014-08.org.nvmexpress:uuid:83294d56";
        let oid = zone_members_oid(1, &group, &zone);
        channel.on_post(&oid, json!({ "EId": format!("{}:{}", zone, member_ref) }));

        let repo = repository(channel);
        let id = repo
            .add_zone_member(1, &group, &zone, member_ref, MemberRole::Host)
            .await
            .unwrap();
        assert!(id.as_str().ends_with(member_ref));
    }

    #[tokio::test]
    async fn test_delete_zone_member_uses_full_id_chain() {
        let channel = Arc::new(FakeChannel::new());
        let group = ZoneGroupId::from_raw(STARFLEET);
        let zone = ZoneId::from_raw(format!("{}:enterprise", STARFLEET));
        let member = ZoneMemberId::from_raw(format!("{}:nqn.x", zone));
        let oid = zone_member_oid(1, &group, &zone, &member);
        channel.on_delete_ok(&oid);

        let repo = repository(channel.clone());
        repo.delete_zone_member(1, &group, &zone, &member).await.unwrap();
        assert_eq!(channel.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_group_delete_maps_404() {
        let channel = Arc::new(FakeChannel::new());
        let group = ZoneGroupId::from_raw(STARFLEET);
        let oid = zone_group_oid(1, &group);
        channel.on_delete_status(&oid, 404);

        let repo = repository(channel);
        let result = repo.delete_zone_group(1, &group).await;
        assert_matches!(result, Err(Error::StaleReference { .. }));
    }

    #[tokio::test]
    async fn test_zone_database_decodes_counts() {
        let channel = Arc::new(FakeChannel::new());
        channel.on_get(
            CONFIG_DB,
            json!({ "NumberZoneGroups": 2, "ZoneGroups": [KLINGONS, STARFLEET] }),
        );

        let repo = repository(channel);
        let db = repo.zone_database(1, ZoneDbKind::Config).await.unwrap();
        assert_eq!(db.kind, ZoneDbKind::Config);
        assert_eq!(db.group_count, 2);
        assert_eq!(db.groups.len(), 2);
    }
}
