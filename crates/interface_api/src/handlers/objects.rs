//! Generic object handlers
//!
//! Both handlers are generic over the payload schema; the router registers
//! one instantiation per object type, so the upsert contract is written
//! exactly once.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use core_kernel::RemoteObject;
use domain_objects::{CrmObjectSchema, ObjectTypeDescriptor};

use crate::dto::objects::MutationResponse;
use crate::{error::ApiError, AppState};

/// Creates a HubSpot object or updates an existing one
///
/// When the schema declares a search property and the payload carries a
/// non-empty value for it, an existing match is updated with only the
/// supplied fields; otherwise a new object is created.
pub async fn create_or_update<S: CrmObjectSchema>(
    State(state): State<AppState>,
    Json(payload): Json<S>,
) -> Result<Json<MutationResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let descriptor = ObjectTypeDescriptor::for_schema::<S>()?;
    let properties = payload.properties()?;

    let outcome = state.objects.create_or_update(&descriptor, properties).await?;

    Ok(Json(MutationResponse::upserted(&descriptor, &outcome)))
}

/// Retrieves a HubSpot object by its id
pub async fn get_object<S: CrmObjectSchema>(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<RemoteObject>, ApiError> {
    let descriptor = ObjectTypeDescriptor::for_schema::<S>()?;

    match state
        .objects
        .fetch_by_id(descriptor.object_type(), &object_id)
        .await?
    {
        Some(object) => Ok(Json(object)),
        None => Err(ApiError::not_found(format!(
            "{} not found",
            descriptor.display_name()
        ))),
    }
}
