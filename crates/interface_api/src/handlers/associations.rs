//! Association handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::AssociationRequest;
use domain_objects::CrmObjectPort;

use crate::dto::objects::MutationResponse;
use crate::{error::ApiError, AppState};

/// Creates an association between two HubSpot objects
///
/// The remote batch response is not inspected beyond success; the action is
/// always reported as "created".
pub async fn create_association(
    State(state): State<AppState>,
    Json(request): Json<AssociationRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    state.crm.create_association(&request).await?;

    Ok(Json(MutationResponse::association_created()))
}

/// Lists associations from one object to a target type, passed through
/// verbatim from the remote API
pub async fn list_associations(
    State(state): State<AppState>,
    Path((object_type, object_id, to_object_type)): Path<(String, String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state
        .crm
        .get_associations(&object_type, &object_id, &to_object_type)
        .await?;

    Ok(Json(listing))
}
