//! Object mutation DTOs

use serde::Serialize;
use serde_json::json;

use core_kernel::PropertyMap;
use domain_objects::{ObjectTypeDescriptor, UpsertOutcome};

/// Uniform envelope returned by the mutating endpoints
///
/// Upsert responses carry the remote id under a key embedding the object
/// type name, e.g. `hubspot_contacts_id`; that key is produced through the
/// flattened `identifiers` map.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub identifiers: PropertyMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
}

impl MutationResponse {
    /// Builds the response for a completed create-or-update
    pub fn upserted(descriptor: &ObjectTypeDescriptor, outcome: &UpsertOutcome) -> Self {
        let mut identifiers = PropertyMap::new();
        identifiers.insert(
            format!("hubspot_{}_id", descriptor.object_type()),
            json!(outcome.object.id),
        );

        Self {
            status: "success",
            message: format!(
                "{} {} successfully",
                descriptor.display_name(),
                outcome.action
            ),
            identifiers,
            action: Some(outcome.action.as_str()),
        }
    }

    /// Builds the response for a created association
    pub fn association_created() -> Self {
        Self {
            status: "success",
            message: "Association created successfully".to_string(),
            identifiers: PropertyMap::new(),
            action: Some("created"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_objects::{ContactProperties, UpsertAction};
    use test_utils::fixtures::RemoteObjectFixtures;

    fn outcome(action: UpsertAction) -> UpsertOutcome {
        UpsertOutcome {
            action,
            object: RemoteObjectFixtures::contact("512", "jane.doe@example.com"),
        }
    }

    #[test]
    fn test_upserted_response_embeds_type_in_id_key() {
        let descriptor = ObjectTypeDescriptor::for_schema::<ContactProperties>().unwrap();
        let response = MutationResponse::upserted(&descriptor, &outcome(UpsertAction::Created));
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Contacts created successfully");
        assert_eq!(body["hubspot_contacts_id"], "512");
        assert_eq!(body["action"], "created");
    }

    #[test]
    fn test_updated_response_message() {
        let descriptor = ObjectTypeDescriptor::for_schema::<ContactProperties>().unwrap();
        let response = MutationResponse::upserted(&descriptor, &outcome(UpsertAction::Updated));
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["message"], "Contacts updated successfully");
        assert_eq!(body["action"], "updated");
    }

    #[test]
    fn test_association_response_has_no_id_key() {
        let body = serde_json::to_value(MutationResponse::association_created()).unwrap();

        assert_eq!(body["message"], "Association created successfully");
        assert_eq!(body["action"], "created");
        assert!(body.get("hubspot_contacts_id").is_none());
    }
}
