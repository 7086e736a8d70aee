//! Contact object schema

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PropertyMap;

use crate::schema::CrmObjectSchema;

/// Properties accepted for a CRM contact
///
/// `email` doubles as the search property: submissions carrying an email
/// already known to the CRM update that record instead of creating a
/// duplicate. Unknown members land in `extra` and are forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactProperties {
    #[validate(email)]
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl CrmObjectSchema for ContactProperties {
    const OBJECT_TYPE: &'static str = "contacts";
    const SEARCH_PROPERTY: Option<&'static str> = Some("email");
    const DECLARED_FIELDS: &'static [&'static str] =
        &["email", "firstname", "lastname", "phone", "company"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_deserializes_with_extras() {
        let contact: ContactProperties = serde_json::from_value(json!({
            "email": "ada@example.com",
            "firstname": "Ada",
            "favorite_color": "green"
        }))
        .unwrap();

        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.firstname.as_deref(), Some("Ada"));
        assert!(contact.lastname.is_none());
        assert_eq!(contact.extra.get("favorite_color"), Some(&json!("green")));
    }

    #[test]
    fn test_contact_properties_include_declared_nulls_and_extras() {
        let contact: ContactProperties = serde_json::from_value(json!({
            "email": "ada@example.com",
            "favorite_color": "green"
        }))
        .unwrap();

        let properties = contact.properties().unwrap();

        assert_eq!(properties.get("email"), Some(&json!("ada@example.com")));
        assert_eq!(properties.get("lastname"), Some(&serde_json::Value::Null));
        assert_eq!(properties.get("favorite_color"), Some(&json!("green")));
    }

    #[test]
    fn test_contact_requires_email_member() {
        let result = serde_json::from_value::<ContactProperties>(json!({
            "firstname": "Ada"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_contact_validates_email_format() {
        let contact: ContactProperties = serde_json::from_value(json!({
            "email": "not-an-email"
        }))
        .unwrap();

        assert!(contact.validate().is_err());

        let valid: ContactProperties = serde_json::from_value(json!({
            "email": "ada@example.com"
        }))
        .unwrap();

        assert!(valid.validate().is_ok());
    }
}
