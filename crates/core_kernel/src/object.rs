//! Remote object snapshots and association values exchanged with the CRM

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property bag exchanged with the remote CRM
///
/// Keys are CRM property names; values are whatever JSON the caller or the
/// remote API supplied. Kept ordered so outbound payloads are stable.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// Snapshot of a CRM object as returned by the remote API
///
/// Instances are round-tripped from remote responses; the service never
/// fabricates one outside of tests. The remote API serves camelCase
/// timestamps, accepted here through aliases, while outbound serialization
/// uses the field names as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteObject {
    /// Remote identifier, always a string on the wire
    pub id: String,
    /// Current property values held by the remote system
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
}

impl RemoteObject {
    /// Returns a property as a string slice, when present and textual
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|value| value.as_str())
    }
}

/// Request to link two CRM objects
///
/// All members are required. The association type id selects the remote
/// relation definition (e.g. `"279"` for contact-to-company).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRequest {
    pub from_object_type: String,
    pub from_object_id: String,
    pub to_object_type: String,
    pub to_object_id: String,
    pub association_type_id: String,
}
