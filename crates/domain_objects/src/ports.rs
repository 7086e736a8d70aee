//! Object Domain Ports
//!
//! This module defines the port interface the object domain needs from the
//! remote CRM, enabling swappable implementations (live HTTP gateway, mock,
//! etc.).
//!
//! # Architecture
//!
//! The `CrmObjectPort` trait covers every remote operation the connector
//! performs. Two implementations exist:
//!
//! - **HubSpot gateway** (`infra_hubspot`): reqwest-based adapter against the
//!   live CRM REST API
//! - **Mock adapter**: in-memory store for testing without network access
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_objects::ports::CrmObjectPort;
//! use std::sync::Arc;
//!
//! // Application services receive the port trait
//! pub struct ObjectUpsertService {
//!     crm: Arc<dyn CrmObjectPort>,
//! }
//! ```
//!
//! Not-found is modeled as `Ok(None)` on the read paths, never as an error:
//! a remote 404 and an empty search result are indistinguishable to callers.

use async_trait::async_trait;

use core_kernel::{AssociationRequest, CrmError, HealthCheckable, PropertyMap, RemoteObject};

/// The port trait for remote CRM object operations
///
/// All methods are async and return `Result<T, CrmError>` so the HTTP
/// boundary can classify failures uniformly regardless of the adapter.
#[async_trait]
pub trait CrmObjectPort: HealthCheckable {
    // ========================================================================
    // Object CRUD Operations
    // ========================================================================

    /// Retrieves an object by its remote identifier
    ///
    /// # Returns
    ///
    /// The object snapshot, or `None` when the remote system has no record
    /// with that id.
    async fn fetch_by_id(
        &self,
        object_type: &str,
        id: &str,
    ) -> Result<Option<RemoteObject>, CrmError>;

    /// Creates a new object with the given properties
    ///
    /// # Returns
    ///
    /// The created object as the remote system stored it, including its
    /// generated id and timestamps.
    async fn create(
        &self,
        object_type: &str,
        properties: PropertyMap,
    ) -> Result<RemoteObject, CrmError>;

    /// Updates an existing object with a partial property set
    ///
    /// Only the supplied properties change; everything else keeps its
    /// remote value.
    async fn update(
        &self,
        object_type: &str,
        id: &str,
        properties: PropertyMap,
    ) -> Result<RemoteObject, CrmError>;

    // ========================================================================
    // Search Operations
    // ========================================================================

    /// Finds at most one object whose property equals the given value
    ///
    /// # Returns
    ///
    /// The first match, or `None` when nothing matches.
    async fn search_by_property(
        &self,
        object_type: &str,
        property: &str,
        value: &str,
    ) -> Result<Option<RemoteObject>, CrmError>;

    // ========================================================================
    // Association Operations
    // ========================================================================

    /// Links two objects using the given association type
    ///
    /// # Returns
    ///
    /// The remote confirmation body, passed through opaquely.
    async fn create_association(
        &self,
        request: &AssociationRequest,
    ) -> Result<serde_json::Value, CrmError>;

    /// Lists the associations from an object to a target type
    ///
    /// # Returns
    ///
    /// The remote listing body, passed through opaquely.
    async fn get_associations(
        &self,
        object_type: &str,
        object_id: &str,
        to_object_type: &str,
    ) -> Result<serde_json::Value, CrmError>;
}

/// Mock implementation of CrmObjectPort for testing
///
/// This adapter stores objects in memory and records every call, which lets
/// tests assert on the exact property sets sent to the remote system.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// One remote call observed by the mock
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        /// Port method name (e.g. `"search_by_property"`)
        pub operation: &'static str,
        /// Object type the call addressed
        pub object_type: String,
        /// Property set sent with the call, for create and update
        pub properties: Option<PropertyMap>,
    }

    /// In-memory mock implementation of CrmObjectPort
    #[derive(Debug, Default)]
    pub struct MockCrmPort {
        objects: Arc<RwLock<HashMap<String, Vec<RemoteObject>>>>,
        associations: Arc<RwLock<Vec<AssociationRequest>>>,
        calls: Arc<RwLock<Vec<RecordedCall>>>,
        fail_next: Arc<RwLock<Option<(&'static str, CrmError)>>>,
        next_id: AtomicU64,
    }

    impl MockCrmPort {
        /// Creates a new empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates an object and returns the stored snapshot
        pub async fn seed(&self, object_type: &str, properties: PropertyMap) -> RemoteObject {
            self.store(object_type, properties).await
        }

        /// Arranges for the next call of the named operation to fail
        pub async fn fail_next(&self, operation: &'static str, error: CrmError) {
            *self.fail_next.write().await = Some((operation, error));
        }

        /// Returns every call the mock has observed so far
        pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
            self.calls.read().await.clone()
        }

        /// Returns the association requests accepted so far
        pub async fn recorded_associations(&self) -> Vec<AssociationRequest> {
            self.associations.read().await.clone()
        }

        async fn store(&self, object_type: &str, properties: PropertyMap) -> RemoteObject {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let now = Utc::now();
            let object = RemoteObject {
                id: id.to_string(),
                properties,
                created_at: now,
                updated_at: now,
                archived: false,
            };
            self.objects
                .write()
                .await
                .entry(object_type.to_string())
                .or_default()
                .push(object.clone());
            object
        }

        async fn record(
            &self,
            operation: &'static str,
            object_type: &str,
            properties: Option<&PropertyMap>,
        ) {
            self.calls.write().await.push(RecordedCall {
                operation,
                object_type: object_type.to_string(),
                properties: properties.cloned(),
            });
        }

        async fn take_failure(&self, operation: &'static str) -> Option<CrmError> {
            let mut slot = self.fail_next.write().await;
            match slot.take() {
                Some((op, error)) if op == operation => Some(error),
                other => {
                    *slot = other;
                    None
                }
            }
        }
    }

    #[async_trait]
    impl HealthCheckable for MockCrmPort {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy("mock-crm-port");
            result.message = Some("Mock adapter always healthy".to_string());
            result
        }
    }

    #[async_trait]
    impl CrmObjectPort for MockCrmPort {
        async fn fetch_by_id(
            &self,
            object_type: &str,
            id: &str,
        ) -> Result<Option<RemoteObject>, CrmError> {
            self.record("fetch_by_id", object_type, None).await;
            if let Some(error) = self.take_failure("fetch_by_id").await {
                return Err(error);
            }

            let objects = self.objects.read().await;
            Ok(objects
                .get(object_type)
                .and_then(|entries| entries.iter().find(|o| o.id == id))
                .cloned())
        }

        async fn create(
            &self,
            object_type: &str,
            properties: PropertyMap,
        ) -> Result<RemoteObject, CrmError> {
            self.record("create", object_type, Some(&properties)).await;
            if let Some(error) = self.take_failure("create").await {
                return Err(error);
            }

            Ok(self.store(object_type, properties).await)
        }

        async fn update(
            &self,
            object_type: &str,
            id: &str,
            properties: PropertyMap,
        ) -> Result<RemoteObject, CrmError> {
            self.record("update", object_type, Some(&properties)).await;
            if let Some(error) = self.take_failure("update").await {
                return Err(error);
            }

            let mut objects = self.objects.write().await;
            let entries = objects
                .get_mut(object_type)
                .ok_or_else(|| CrmError::remote_api(404, "resource not found"))?;
            let object = entries
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| CrmError::remote_api(404, "resource not found"))?;

            for (key, value) in properties {
                object.properties.insert(key, value);
            }
            object.updated_at = Utc::now();

            Ok(object.clone())
        }

        async fn search_by_property(
            &self,
            object_type: &str,
            property: &str,
            value: &str,
        ) -> Result<Option<RemoteObject>, CrmError> {
            self.record("search_by_property", object_type, None).await;
            if let Some(error) = self.take_failure("search_by_property").await {
                return Err(error);
            }

            let objects = self.objects.read().await;
            Ok(objects
                .get(object_type)
                .and_then(|entries| {
                    entries
                        .iter()
                        .find(|o| o.property_str(property) == Some(value))
                })
                .cloned())
        }

        async fn create_association(
            &self,
            request: &AssociationRequest,
        ) -> Result<serde_json::Value, CrmError> {
            self.record("create_association", &request.from_object_type, None)
                .await;
            if let Some(error) = self.take_failure("create_association").await {
                return Err(error);
            }

            self.associations.write().await.push(request.clone());
            Ok(json!({ "status": "COMPLETE" }))
        }

        async fn get_associations(
            &self,
            object_type: &str,
            object_id: &str,
            to_object_type: &str,
        ) -> Result<serde_json::Value, CrmError> {
            self.record("get_associations", object_type, None).await;
            if let Some(error) = self.take_failure("get_associations").await {
                return Err(error);
            }

            let associations = self.associations.read().await;
            let results: Vec<serde_json::Value> = associations
                .iter()
                .filter(|a| {
                    a.from_object_type == object_type
                        && a.from_object_id == object_id
                        && a.to_object_type == to_object_type
                })
                .map(|a| {
                    json!({
                        "toObjectId": a.to_object_id,
                        "associationTypes": [
                            { "category": "USER_DEFINED", "typeId": a.association_type_id }
                        ]
                    })
                })
                .collect();

            Ok(json!({ "results": results }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCrmPort;
    use super::*;
    use serde_json::json;

    fn props(value: serde_json::Value) -> PropertyMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_mock_port_create_and_fetch() {
        let port = MockCrmPort::new();

        let created = port
            .create("contacts", props(json!({"email": "ada@example.com"})))
            .await
            .unwrap();

        let fetched = port.fetch_by_id("contacts", &created.id).await.unwrap();
        assert_eq!(fetched.unwrap().property_str("email"), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_mock_port_fetch_missing_is_none() {
        let port = MockCrmPort::new();
        let fetched = port.fetch_by_id("contacts", "999").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_mock_port_search_by_property() {
        let port = MockCrmPort::new();
        port.seed("contacts", props(json!({"email": "ada@example.com"})))
            .await;

        let hit = port
            .search_by_property("contacts", "email", "ada@example.com")
            .await
            .unwrap();
        assert!(hit.is_some());

        let miss = port
            .search_by_property("contacts", "email", "grace@example.com")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_mock_port_update_merges_properties() {
        let port = MockCrmPort::new();
        let seeded = port
            .seed(
                "contacts",
                props(json!({"email": "ada@example.com", "firstname": "Ada"})),
            )
            .await;

        let updated = port
            .update("contacts", &seeded.id, props(json!({"lastname": "Lovelace"})))
            .await
            .unwrap();

        assert_eq!(updated.property_str("firstname"), Some("Ada"));
        assert_eq!(updated.property_str("lastname"), Some("Lovelace"));
        assert_eq!(updated.id, seeded.id);
    }

    #[tokio::test]
    async fn test_mock_port_update_missing_is_remote_404() {
        let port = MockCrmPort::new();
        let error = port
            .update("contacts", "999", props(json!({"firstname": "Ada"})))
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_association_round_trip() {
        let port = MockCrmPort::new();
        let request = AssociationRequest {
            from_object_type: "contact".to_string(),
            from_object_id: "123".to_string(),
            to_object_type: "company".to_string(),
            to_object_id: "456".to_string(),
            association_type_id: "279".to_string(),
        };

        port.create_association(&request).await.unwrap();

        let listing = port
            .get_associations("contact", "123", "company")
            .await
            .unwrap();
        assert_eq!(listing["results"][0]["toObjectId"], json!("456"));
    }

    #[tokio::test]
    async fn test_mock_port_fail_next_applies_once() {
        let port = MockCrmPort::new();
        port.fail_next("create", CrmError::remote_api(429, "rate limited"))
            .await;

        let error = port
            .create("contacts", props(json!({"email": "ada@example.com"})))
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(429));

        let ok = port
            .create("contacts", props(json!({"email": "ada@example.com"})))
            .await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_mock_port_health_check() {
        let port = MockCrmPort::new();
        let result = port.health_check().await;
        assert!(result.is_healthy());
    }
}
