//! Pre-built Test Fixtures
//!
//! Provides ready-to-use request payloads and remote-object snapshots for
//! the connector test suites. These fixtures are designed to be consistent
//! and predictable for unit tests.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use core_kernel::RemoteObject;

/// Fixture for inbound request payloads
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// A fully populated contact payload
    pub fn contact() -> Value {
        json!({
            "email": "jane.doe@example.com",
            "firstname": "Jane",
            "lastname": "Doe",
            "phone": "+1-555-0100",
            "company": "Acme Corp",
        })
    }

    /// A contact carrying only the required member
    pub fn minimal_contact() -> Value {
        json!({ "email": "solo@example.com" })
    }

    /// A fully populated company payload
    pub fn company() -> Value {
        json!({
            "name": "Acme Corp",
            "domain": "acme.example.com",
            "phone": "+1-555-0199",
            "city": "Springfield",
            "state": "IL",
            "zip": "62701",
        })
    }

    /// A ticket payload with pipeline placement
    pub fn ticket() -> Value {
        json!({
            "hs_pipeline": "0",
            "hs_pipeline_stage": "1",
            "hs_ticket_priority": "HIGH",
            "subject": "Billing question",
            "content": "Customer asked about the latest invoice.",
        })
    }

    /// An association request linking a contact to a company
    pub fn association() -> Value {
        json!({
            "from_object_type": "contacts",
            "from_object_id": "101",
            "to_object_type": "companies",
            "to_object_id": "202",
            "association_type_id": "1",
        })
    }

    /// A single-event webhook batch in HubSpot's notification shape
    pub fn webhook_events() -> Value {
        json!([
            {
                "eventId": 1,
                "subscriptionId": 12345,
                "portalId": 62515,
                "appId": 1,
                "occurredAt": "2023-01-01T00:00:00.000Z",
                "subscriptionType": "contact.propertyChange",
                "attemptNumber": 0,
                "objectId": 1,
                "changeFlag": "NEW",
                "changeSource": "CRM",
                "propertyName": "email",
                "propertyValue": "new@example.com",
            }
        ])
    }
}

/// Fixture for remote objects as decoded from CRM responses
pub struct RemoteObjectFixtures;

impl RemoteObjectFixtures {
    /// A contact with deterministic timestamps
    pub fn contact(id: &str, email: &str) -> RemoteObject {
        let timestamp = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut properties = serde_json::Map::new();
        properties.insert("email".to_string(), json!(email));
        properties.insert("firstname".to_string(), json!("Jane"));
        properties.insert("lastname".to_string(), json!("Doe"));

        RemoteObject {
            id: id.to_string(),
            properties,
            created_at: timestamp,
            updated_at: timestamp,
            archived: false,
        }
    }

    /// A company with deterministic timestamps
    pub fn company(id: &str, domain: &str) -> RemoteObject {
        let timestamp = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_string(), json!("Acme Corp"));
        properties.insert("domain".to_string(), json!(domain));

        RemoteObject {
            id: id.to_string(),
            properties,
            created_at: timestamp,
            updated_at: timestamp,
            archived: false,
        }
    }
}

/// Computes the v1 webhook signature: hex SHA-256 over the secret
/// concatenated with the raw request body
pub fn webhook_signature(secret: &str, body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(body);
    format!("{:x}", hasher.finalize())
}
