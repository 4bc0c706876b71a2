//! REST transport for the discovery controller
//!
//! The controller exposes a Redfish-style HTTPS API. Everything above this
//! module addresses resources by OID (the path below `/redfish/v1`) and
//! exchanges untyped JSON payloads; shaping a payload into a typed entity is
//! the caller's job, done immediately at the boundary.

pub mod rest;

#[cfg(test)]
pub(crate) mod fake;

pub use rest::{RestClient, RestConfig};

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Untyped JSON payload exchanged with the controller
pub type Payload = Value;

/// Port for the request/response channel to the discovery controller
///
/// Each call is a single bounded exchange; success means the controller
/// answered with a 2xx status. No retries happen at this layer.
#[async_trait]
pub trait RestChannel: Send + Sync {
    /// Issue a GET request
    async fn get(&self, oid: &str) -> Result<Payload>;

    /// Issue a POST request with a JSON body
    async fn post(&self, oid: &str, body: Payload) -> Result<Payload>;

    /// Issue a PUT request with a JSON body
    async fn put(&self, oid: &str, body: Payload) -> Result<Payload>;

    /// Issue a DELETE request
    async fn delete(&self, oid: &str) -> Result<()>;
}

/// Map a non-2xx status to the error it represents for this OID.
///
/// 409 is a duplicate create; 404 on an id-addressed operation means the id
/// resolved earlier no longer names anything.
pub(crate) fn status_error(oid: &str, status: u16) -> Error {
    match status {
        409 => Error::Conflict {
            kind: "resource".into(),
            name: oid.to_string(),
        },
        404 => Error::StaleReference {
            id: oid.to_string(),
        },
        _ => Error::Transport {
            oid: oid.to_string(),
            status,
        },
    }
}

/// Fetch an expanded collection and return its elements.
///
/// A failed list read yields an empty vector, not an error: an empty
/// collection and an unreachable controller are indistinguishable through
/// this interface, and callers that care must check connectivity separately.
pub(crate) async fn fetch_list(
    channel: &dyn RestChannel,
    oid: &str,
    key: &str,
) -> Vec<Payload> {
    let reply = match channel.get(oid).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!("List read failed for {}: {}", oid, err);
            return Vec::new();
        }
    };

    match reply.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Extract the `EId` field the controller returns from create operations
pub(crate) fn extract_eid(oid: &str, reply: &Payload) -> Result<String> {
    reply
        .get("EId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Decode {
            oid: oid.to_string(),
            reason: "create reply is missing the EId field".into(),
        })
}
