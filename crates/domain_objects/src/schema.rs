//! Object schema contract and registration-time descriptors
//!
//! Every CRM object type the connector exposes is described by a type
//! implementing [`CrmObjectSchema`]: a serde-deserializable payload struct
//! carrying the object type name, the property used to locate existing
//! records, and the list of typed fields. The HTTP layer registers one
//! route pair per schema and drives the generic upsert through the
//! [`ObjectTypeDescriptor`] built here.

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use core_kernel::PropertyMap;

use crate::error::SchemaError;

/// Contract for a CRM object payload schema
///
/// Implementors are plain serde structs whose typed fields mirror the CRM
/// properties the connector understands, plus a flattened map that passes
/// unknown properties through untouched.
pub trait CrmObjectSchema:
    Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    /// Object type name as it appears in CRM API paths (e.g. `"contacts"`)
    const OBJECT_TYPE: &'static str;

    /// Property used to find an existing record before choosing create or
    /// update; `None` means every submission creates a new record
    const SEARCH_PROPERTY: Option<&'static str>;

    /// Typed fields of this schema, excluding the extra passthrough map
    const DECLARED_FIELDS: &'static [&'static str];

    /// Flattens the payload into the outbound property map
    ///
    /// Declared optionals missing from the request serialize as JSON nulls;
    /// extra passthrough members keep the names the caller sent.
    fn properties(&self) -> Result<PropertyMap, SchemaError> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(SchemaError::flatten(
                Self::OBJECT_TYPE,
                format!("expected a JSON object, got {}", value_kind(&other)),
            )),
            Err(err) => Err(SchemaError::flatten(Self::OBJECT_TYPE, err.to_string())),
        }
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Registration-time description of a CRM object type
///
/// Built once per schema when routes are registered and shared read-only
/// afterwards. Construction verifies that the search property, when
/// configured, names a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTypeDescriptor {
    object_type: &'static str,
    search_property: Option<&'static str>,
    declared_fields: &'static [&'static str],
}

impl ObjectTypeDescriptor {
    /// Builds the descriptor for a schema, validating its constants
    pub fn for_schema<S: CrmObjectSchema>() -> Result<Self, SchemaError> {
        if let Some(property) = S::SEARCH_PROPERTY {
            if !S::DECLARED_FIELDS.contains(&property) {
                return Err(SchemaError::UndeclaredSearchProperty {
                    object_type: S::OBJECT_TYPE,
                    property,
                });
            }
        }

        Ok(Self {
            object_type: S::OBJECT_TYPE,
            search_property: S::SEARCH_PROPERTY,
            declared_fields: S::DECLARED_FIELDS,
        })
    }

    /// Object type name used in CRM API paths
    pub fn object_type(&self) -> &'static str {
        self.object_type
    }

    /// Property consulted before choosing the create or update path
    pub fn search_property(&self) -> Option<&'static str> {
        self.search_property
    }

    /// Typed fields declared by the schema
    pub fn declared_fields(&self) -> &'static [&'static str] {
        self.declared_fields
    }

    /// Capitalized type name for human-facing messages (e.g. `"Contacts"`)
    pub fn display_name(&self) -> String {
        let mut chars = self.object_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}
