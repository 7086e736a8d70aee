//! CRM Object Domain
//!
//! This crate owns everything the connector knows about CRM objects:
//!
//! - **Schemas**: one serde struct per exposed object type (contacts,
//!   companies, tickets), each declaring its type name, search property,
//!   and typed fields, with unknown members passed through verbatim
//! - **Port**: the `CrmObjectPort` trait the HTTP gateway implements, plus
//!   an in-memory mock for tests
//! - **Upsert**: the create-or-update decision that drives every object
//!   submission
//!
//! # Create-or-update in one example
//!
//! ```rust,ignore
//! use domain_objects::{ObjectTypeDescriptor, ObjectUpsertService};
//! use domain_objects::contact::ContactProperties;
//! use domain_objects::schema::CrmObjectSchema;
//!
//! let descriptor = ObjectTypeDescriptor::for_schema::<ContactProperties>()?;
//! let payload: ContactProperties = serde_json::from_str(body)?;
//!
//! // Searches by email first; a hit updates that record, a miss creates.
//! let outcome = service.create_or_update(&descriptor, payload.properties()?).await?;
//! println!("{} {}", outcome.action, outcome.object.id);
//! ```

pub mod company;
pub mod contact;
pub mod error;
pub mod ports;
pub mod schema;
pub mod ticket;
pub mod upsert;

pub use company::CompanyProperties;
pub use contact::ContactProperties;
pub use error::SchemaError;
pub use ports::CrmObjectPort;
pub use schema::{CrmObjectSchema, ObjectTypeDescriptor};
pub use ticket::TicketProperties;
pub use upsert::{ObjectUpsertService, UpsertAction, UpsertOutcome};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockCrmPort;
