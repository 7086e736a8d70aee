//! Core error types used across the system

use thiserror::Error;

/// Uniform error for operations against the remote CRM API
///
/// Every port implementation reports failures through this type so callers
/// and the HTTP boundary can classify them consistently.
#[derive(Debug, Error)]
pub enum CrmError {
    /// The remote API answered with a non-success status
    #[error("CRM API error: {status} - {body}")]
    RemoteApi { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout)
    #[error("Network error during CRM API request: {0}")]
    Network(String),

    /// A success response carried a body that could not be decoded
    #[error("Failed to decode CRM API response: {0}")]
    Decode(String),

    /// The adapter was misconfigured or could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CrmError {
    /// Creates a RemoteApi error from a response status and body
    pub fn remote_api(status: u16, body: impl Into<String>) -> Self {
        CrmError::RemoteApi {
            status,
            body: body.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        CrmError::Network(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        CrmError::Decode(message.into())
    }

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        CrmError::Configuration(message.into())
    }

    /// Status code of the remote response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            CrmError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the remote API reported the requested resource missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        match self {
            CrmError::Network(_) => true,
            CrmError::RemoteApi { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
