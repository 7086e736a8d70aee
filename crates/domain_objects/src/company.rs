//! Company object schema

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PropertyMap;

use crate::schema::CrmObjectSchema;

/// Properties accepted for a CRM company
///
/// `domain` is the search property but stays optional: submissions without
/// one always create a new record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyProperties {
    pub name: String,
    pub domain: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl CrmObjectSchema for CompanyProperties {
    const OBJECT_TYPE: &'static str = "companies";
    const SEARCH_PROPERTY: Option<&'static str> = Some("domain");
    const DECLARED_FIELDS: &'static [&'static str] =
        &["name", "domain", "phone", "city", "state", "zip"];
}
