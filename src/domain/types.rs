//! Entity types decoded from controller payloads
//!
//! Every external read comes back as an untyped payload; these types shape it
//! at the boundary. Field names follow the controller's PascalCase wire
//! format via serde renames, unknown fields are ignored.

use crate::error::{Error, Result};
use crate::transport::Payload;
use crate::zoning::ident::ZoneGroupId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerations
// =============================================================================

/// Kind of zone database: staged edits or the enforced configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneDbKind {
    Config,
    Active,
}

impl ZoneDbKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneDbKind::Config => "config",
            ZoneDbKind::Active => "active",
        }
    }
}

impl std::fmt::Display for ZoneDbKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a zone member, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberRole {
    Host,
    Subsystem,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Host => "Host",
            MemberRole::Subsystem => "Subsystem",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative state of a controller service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminState {
    Enable,
    Disable,
}

// =============================================================================
// Inventory Entities
// =============================================================================

/// A fabric-attached initiator registered with the controller
#[derive(Debug, Clone, Deserialize)]
pub struct Host {
    /// NVMe Qualified Name
    #[serde(rename = "NQN")]
    pub nqn: String,
    /// Transport address the host registered from
    #[serde(rename = "TransportAddress")]
    pub transport_address: String,
    /// Opaque member reference used for zoning
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ConnectionStatus", default)]
    pub connection_status: Option<String>,
    #[serde(rename = "NodeName", default)]
    pub node_name: Option<String>,
}

/// A fabric-attached target registered with the controller
#[derive(Debug, Clone, Deserialize)]
pub struct Subsystem {
    /// NVMe Qualified Name
    #[serde(rename = "NQN")]
    pub nqn: String,
    /// Opaque member reference used for zoning
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "TransportAddress", default)]
    pub transport_address: Option<String>,
}

/// A discovery-controller instance bound to network interfaces
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    /// Instance identifier (the controller reports it as a string)
    #[serde(rename = "InstanceIdentifier")]
    pub id: String,
    #[serde(rename = "Interfaces", default)]
    pub interfaces: Vec<String>,
    #[serde(rename = "CDCAdminState")]
    pub cdc_admin_state: AdminState,
    #[serde(rename = "DiscoverySvcAdminState")]
    pub discovery_admin_state: AdminState,
}

/// Reference to a registered direct discovery controller
#[derive(Debug, Clone, Deserialize)]
pub struct DdcRef {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

// =============================================================================
// Zoning Entities
// =============================================================================

/// A named access-control boundary inside a zone group
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    #[serde(rename = "ZoneName")]
    pub name: String,
    #[serde(rename = "ZoneId")]
    pub id: String,
    /// String representation of an integer on the wire
    #[serde(rename = "numberZoneMembers", default)]
    pub member_count: Option<String>,
}

/// A host or subsystem admitted into a zone
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneMember {
    /// Full composite member id
    #[serde(rename = "ZoneMemberId")]
    pub id: String,
    #[serde(rename = "Role")]
    pub role: MemberRole,
    #[serde(rename = "ZoneMemberType", default)]
    pub member_type: Option<String>,
}

/// Decoded view of one zone database
#[derive(Debug, Clone)]
pub struct ZoneDatabase {
    pub kind: ZoneDbKind,
    pub group_count: u32,
    pub groups: Vec<ZoneGroupId>,
}

// =============================================================================
// Payload Decoding
// =============================================================================

/// Shape an untyped payload into a typed entity, failing with a decode error
/// rather than propagating a wrong shape.
pub(crate) fn decode_entity<T: DeserializeOwned>(oid: &str, payload: Payload) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| Error::Decode {
        oid: oid.to_string(),
        reason: err.to_string(),
    })
}
