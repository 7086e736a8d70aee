//! Create-or-update decision logic
//!
//! The connector's central behavior: given an object type descriptor and a
//! flattened property map, decide whether the submission creates a new CRM
//! record or updates an existing one.
//!
//! The decision runs in two legs:
//!
//! 1. When the descriptor names a search property and the payload carries a
//!    non-empty string value for it, look the value up remotely. A hit means
//!    the update path; the update sends only the fields the caller actually
//!    supplied (JSON nulls dropped).
//! 2. Otherwise create, sending the full declared property set (missing
//!    optionals as nulls) plus any extras.
//!
//! Search and mutation are two separate remote calls with no coordination
//! between them: concurrent submissions sharing a search value can both take
//! the create leg. The remote system keeps the duplicates.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use core_kernel::{CrmError, PropertyMap, RemoteObject};

use crate::ports::CrmObjectPort;
use crate::schema::ObjectTypeDescriptor;

/// Which leg the upsert took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
}

impl UpsertAction {
    /// Verb used in human-facing messages
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertAction::Created => "created",
            UpsertAction::Updated => "updated",
        }
    }
}

impl fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single create-or-update decision
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// Whether the object was created or updated
    pub action: UpsertAction,
    /// The object as the remote system returned it after the mutation
    pub object: RemoteObject,
}

/// Application service driving object reads and upserts through the port
#[derive(Clone)]
pub struct ObjectUpsertService {
    crm: Arc<dyn CrmObjectPort>,
}

impl ObjectUpsertService {
    /// Creates a service backed by the given port implementation
    pub fn new(crm: Arc<dyn CrmObjectPort>) -> Self {
        Self { crm }
    }

    /// Creates or updates one object, issuing exactly one mutating call
    pub async fn create_or_update(
        &self,
        descriptor: &ObjectTypeDescriptor,
        properties: PropertyMap,
    ) -> Result<UpsertOutcome, CrmError> {
        if let Some(property) = descriptor.search_property() {
            if let Some(value) = search_value(&properties, property) {
                let existing = self
                    .crm
                    .search_by_property(descriptor.object_type(), property, &value)
                    .await?;

                if let Some(existing) = existing {
                    let object = self
                        .crm
                        .update(
                            descriptor.object_type(),
                            &existing.id,
                            supplied_fields(&properties),
                        )
                        .await?;
                    return Ok(UpsertOutcome {
                        action: UpsertAction::Updated,
                        object,
                    });
                }
            }
        }

        let object = self.crm.create(descriptor.object_type(), properties).await?;
        Ok(UpsertOutcome {
            action: UpsertAction::Created,
            object,
        })
    }

    /// Retrieves one object by id; `None` means the remote has no record
    pub async fn fetch_by_id(
        &self,
        object_type: &str,
        id: &str,
    ) -> Result<Option<RemoteObject>, CrmError> {
        self.crm.fetch_by_id(object_type, id).await
    }
}

/// Extracts the value used for the pre-mutation search
///
/// Only a non-empty string triggers the search leg; null, absent, and
/// non-string values all fall through to the create path.
pub fn search_value(properties: &PropertyMap, property: &str) -> Option<String> {
    match properties.get(property) {
        Some(serde_json::Value::String(value)) if !value.is_empty() => Some(value.clone()),
        _ => None,
    }
}

/// Drops JSON-null members so updates carry only fields the caller supplied
pub fn supplied_fields(properties: &PropertyMap) -> PropertyMap {
    properties
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::company::CompanyProperties;
    use crate::contact::ContactProperties;
    use crate::ports::mock::MockCrmPort;
    use crate::schema::CrmObjectSchema;
    use crate::ticket::TicketProperties;

    fn props(value: serde_json::Value) -> PropertyMap {
        value.as_object().cloned().unwrap_or_default()
    }

    fn contacts() -> ObjectTypeDescriptor {
        ObjectTypeDescriptor::for_schema::<ContactProperties>().unwrap()
    }

    fn companies() -> ObjectTypeDescriptor {
        ObjectTypeDescriptor::for_schema::<CompanyProperties>().unwrap()
    }

    fn tickets() -> ObjectTypeDescriptor {
        ObjectTypeDescriptor::for_schema::<TicketProperties>().unwrap()
    }

    fn service() -> (ObjectUpsertService, Arc<MockCrmPort>) {
        let mock = Arc::new(MockCrmPort::new());
        (ObjectUpsertService::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_upsert_creates_when_nothing_matches() {
        let (service, mock) = service();

        let outcome = service
            .create_or_update(&contacts(), props(json!({"email": "ada@example.com"})))
            .await
            .unwrap();

        assert_eq!(outcome.action, UpsertAction::Created);
        assert_eq!(
            outcome.object.property_str("email"),
            Some("ada@example.com")
        );

        let operations: Vec<_> = mock
            .recorded_calls()
            .await
            .into_iter()
            .map(|c| c.operation)
            .collect();
        assert_eq!(operations, vec!["search_by_property", "create"]);
    }

    #[tokio::test]
    async fn test_upsert_updates_when_search_hits() {
        let (service, mock) = service();
        let seeded = mock
            .seed("contacts", props(json!({"email": "ada@example.com"})))
            .await;

        let outcome = service
            .create_or_update(
                &contacts(),
                props(json!({"email": "ada@example.com", "firstname": "Ada"})),
            )
            .await
            .unwrap();

        assert_eq!(outcome.action, UpsertAction::Updated);
        assert_eq!(outcome.object.id, seeded.id);
        assert_eq!(outcome.object.property_str("firstname"), Some("Ada"));
    }

    #[tokio::test]
    async fn test_repeated_upsert_converges_on_one_record() {
        let (service, _) = service();
        let payload = props(json!({"email": "ada@example.com", "firstname": "Ada"}));

        let first = service
            .create_or_update(&contacts(), payload.clone())
            .await
            .unwrap();
        let second = service
            .create_or_update(&contacts(), payload)
            .await
            .unwrap();

        assert_eq!(first.action, UpsertAction::Created);
        assert_eq!(second.action, UpsertAction::Updated);
        assert_eq!(first.object.id, second.object.id);
    }

    #[tokio::test]
    async fn test_update_sends_only_supplied_fields() {
        let (service, mock) = service();
        mock.seed(
            "contacts",
            props(json!({"email": "ada@example.com", "lastname": "Lovelace"})),
        )
        .await;

        // Payload shaped the way a schema flattens it: absent optionals are nulls.
        service
            .create_or_update(
                &contacts(),
                props(json!({
                    "email": "ada@example.com",
                    "firstname": "Ada",
                    "lastname": null,
                    "phone": null
                })),
            )
            .await
            .unwrap();

        let update = mock
            .recorded_calls()
            .await
            .into_iter()
            .find(|c| c.operation == "update")
            .unwrap();
        let sent = update.properties.unwrap();

        assert_eq!(sent.get("email"), Some(&json!("ada@example.com")));
        assert_eq!(sent.get("firstname"), Some(&json!("Ada")));
        assert!(!sent.contains_key("lastname"));
        assert!(!sent.contains_key("phone"));
    }

    #[tokio::test]
    async fn test_upsert_skips_search_without_search_property() {
        let (service, mock) = service();
        let payload = props(json!({
            "hs_pipeline": "0",
            "hs_pipeline_stage": "1",
            "subject": "Printer on fire"
        }));

        let first = service
            .create_or_update(&tickets(), payload.clone())
            .await
            .unwrap();
        let second = service.create_or_update(&tickets(), payload).await.unwrap();

        assert_eq!(first.action, UpsertAction::Created);
        assert_eq!(second.action, UpsertAction::Created);
        assert_ne!(first.object.id, second.object.id);

        let calls = mock.recorded_calls().await;
        assert!(calls.iter().all(|c| c.operation != "search_by_property"));
    }

    #[tokio::test]
    async fn test_upsert_creates_when_search_value_empty() {
        let (service, mock) = service();
        mock.seed("companies", props(json!({"name": "Acme", "domain": "acme.test"})))
            .await;

        let outcome = service
            .create_or_update(&companies(), props(json!({"name": "Acme", "domain": ""})))
            .await
            .unwrap();

        assert_eq!(outcome.action, UpsertAction::Created);

        let calls = mock.recorded_calls().await;
        assert!(calls.iter().all(|c| c.operation != "search_by_property"));
    }

    #[tokio::test]
    async fn test_upsert_propagates_port_errors() {
        let (service, mock) = service();
        mock.fail_next(
            "search_by_property",
            CrmError::remote_api(500, "internal error"),
        )
        .await;

        let error = service
            .create_or_update(&contacts(), props(json!({"email": "ada@example.com"})))
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(500));
    }

    #[tokio::test]
    async fn test_fetch_by_id_delegates_to_port() {
        let (service, mock) = service();
        let seeded = mock
            .seed("contacts", props(json!({"email": "ada@example.com"})))
            .await;

        let found = service.fetch_by_id("contacts", &seeded.id).await.unwrap();
        assert_eq!(found.unwrap().id, seeded.id);

        let missing = service.fetch_by_id("contacts", "999").await.unwrap();
        assert!(missing.is_none());
    }
}
