//! Tests for remote object and association value types

use chrono::{TimeZone, Utc};
use core_kernel::object::{AssociationRequest, RemoteObject};
use serde_json::json;

#[test]
fn test_remote_object_deserializes_remote_timestamps() {
    let body = json!({
        "id": "123",
        "properties": {"email": "ada@example.com", "firstname": "Ada"},
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-01-02T12:30:45.123Z",
        "archived": false
    });

    let object: RemoteObject = serde_json::from_value(body).unwrap();

    assert_eq!(object.id, "123");
    assert_eq!(object.property_str("email"), Some("ada@example.com"));
    assert_eq!(
        object.created_at,
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(object.updated_at.timestamp_millis(), 1_672_662_645_123);
    assert!(!object.archived);
}

#[test]
fn test_remote_object_serializes_snake_case() {
    let object = RemoteObject {
        id: "42".to_string(),
        properties: serde_json::Map::new(),
        created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        archived: false,
    };

    let value = serde_json::to_value(&object).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();

    assert!(keys.contains(&"created_at"));
    assert!(keys.contains(&"updated_at"));
    assert!(!keys.contains(&"createdAt"));
}

#[test]
fn test_remote_object_round_trips_through_own_encoding() {
    let object = RemoteObject {
        id: "7".to_string(),
        properties: json!({"name": "Acme"}).as_object().unwrap().clone(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 16, 8, 30, 0).unwrap(),
        archived: true,
    };

    let encoded = serde_json::to_string(&object).unwrap();
    let decoded: RemoteObject = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, object);
}

#[test]
fn test_remote_object_tolerates_missing_optional_members() {
    let body = json!({
        "id": "9",
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-01-01T00:00:00Z"
    });

    let object: RemoteObject = serde_json::from_value(body).unwrap();

    assert!(object.properties.is_empty());
    assert!(!object.archived);
    assert_eq!(object.property_str("anything"), None);
}

#[test]
fn test_association_request_deserializes_wire_names() {
    let body = json!({
        "from_object_type": "contact",
        "from_object_id": "123",
        "to_object_type": "company",
        "to_object_id": "456",
        "association_type_id": "279"
    });

    let request: AssociationRequest = serde_json::from_value(body).unwrap();

    assert_eq!(request.from_object_type, "contact");
    assert_eq!(request.from_object_id, "123");
    assert_eq!(request.to_object_type, "company");
    assert_eq!(request.to_object_id, "456");
    assert_eq!(request.association_type_id, "279");
}

#[test]
fn test_association_request_rejects_missing_members() {
    let body = json!({
        "from_object_type": "contact",
        "from_object_id": "123",
        "to_object_type": "company"
    });

    assert!(serde_json::from_value::<AssociationRequest>(body).is_err());
}
