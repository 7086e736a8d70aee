//! Ticket object schema

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PropertyMap;

use crate::schema::CrmObjectSchema;

/// Properties accepted for a CRM ticket
///
/// Tickets have no search property: every submission opens a new ticket,
/// including repeated identical ones.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketProperties {
    pub hs_pipeline: String,
    pub hs_pipeline_stage: String,
    pub hs_ticket_priority: Option<String>,
    pub subject: String,
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl CrmObjectSchema for TicketProperties {
    const OBJECT_TYPE: &'static str = "tickets";
    const SEARCH_PROPERTY: Option<&'static str> = None;
    const DECLARED_FIELDS: &'static [&'static str] = &[
        "hs_pipeline",
        "hs_pipeline_stage",
        "hs_ticket_priority",
        "subject",
        "content",
    ];
}
