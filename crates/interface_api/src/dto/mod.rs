//! Request/Response data transfer objects

pub mod objects;
pub mod webhooks;
