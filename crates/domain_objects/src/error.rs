//! Error types for the object domain

use thiserror::Error;

/// Errors raised while describing or flattening an object schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The configured search property is not one of the schema's declared fields
    #[error("search property '{property}' is not a declared field of '{object_type}'")]
    UndeclaredSearchProperty {
        object_type: &'static str,
        property: &'static str,
    },

    /// The payload could not be flattened into a property map
    #[error("failed to flatten '{object_type}' payload into properties: {message}")]
    Flatten {
        object_type: &'static str,
        message: String,
    },
}

impl SchemaError {
    pub fn flatten(object_type: &'static str, message: impl Into<String>) -> Self {
        SchemaError::Flatten {
            object_type,
            message: message.into(),
        }
    }
}
