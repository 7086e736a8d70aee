//! HTTP API Layer
//!
//! This crate provides the REST API of the HubSpot connector using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: generic object upsert/fetch, associations, webhooks, health
//! - **Middleware**: request audit logging
//! - **DTOs**: uniform response envelopes and webhook event records
//! - **Error Handling**: every failure becomes a `{"detail": ...}` body
//!
//! Object routes are produced by one generic factory instantiated per
//! registered type, so `/contacts`, `/companies`, and `/tickets` share a
//! single upsert implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(gateway), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_objects::{
    CompanyProperties, ContactProperties, CrmObjectPort, CrmObjectSchema, ObjectUpsertService,
    TicketProperties,
};

use crate::config::ApiConfig;
use crate::handlers::{associations, health, objects, webhooks};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upsert decision logic over the CRM port
    pub objects: ObjectUpsertService,
    /// Direct port access for associations and health probes
    pub crm: Arc<dyn CrmObjectPort>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state from a CRM port and configuration
    pub fn new(crm: Arc<dyn CrmObjectPort>, config: ApiConfig) -> Self {
        Self {
            objects: ObjectUpsertService::new(crm.clone()),
            crm,
            config,
        }
    }
}

/// Builds the two object routes for one schema
///
/// `POST /{type}` performs create-or-update, `GET /{type}/{id}` fetches.
/// The path segment comes from the schema's object type name.
pub fn object_routes<S: CrmObjectSchema>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}", S::OBJECT_TYPE),
            post(objects::create_or_update::<S>),
        )
        .route(
            &format!("/{}/:object_id", S::OBJECT_TYPE),
            get(objects::get_object::<S>),
        )
}

/// Creates the main API router
///
/// # Arguments
///
/// * `crm` - CRM port the handlers operate through
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(crm: Arc<dyn CrmObjectPort>, config: ApiConfig) -> Router {
    let state = AppState::new(crm, config);

    // Health routes (not audited)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let association_routes = Router::new()
        .route("/associations", post(associations::create_association))
        .route(
            "/associations/:object_type/:object_id/:to_object_type",
            get(associations::list_associations),
        );

    let webhook_routes = Router::new().route(
        "/webhooks/hubspot",
        post(webhooks::receive_hubspot_events),
    );

    // One registration per object type; all share the generic handlers
    let api_routes = Router::new()
        .merge(object_routes::<ContactProperties>())
        .merge(object_routes::<CompanyProperties>())
        .merge(object_routes::<TicketProperties>())
        .merge(association_routes)
        .merge(webhook_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
