//! HubSpot Infrastructure
//!
//! Live adapter for HubSpot's CRM REST API. This crate implements the
//! `domain_objects::CrmObjectPort` trait over HTTP:
//!
//! - Object CRUD against `/crm/v3/objects/{type}`
//! - Single-property equality search against `/crm/v3/objects/{type}/search`
//! - Associations against the `/crm/v4` endpoints
//!
//! The gateway authenticates with a private app token and normalizes remote
//! 404s on the read paths into `Ok(None)`.

pub mod gateway;

pub use gateway::{HubSpotConfig, HubSpotGateway, DEFAULT_BASE_URL};
