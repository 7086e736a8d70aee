//! HubSpot Gateway
//!
//! This module provides the live adapter for HubSpot's CRM REST API. It
//! implements the `CrmObjectPort` trait, translating port operations into
//! HTTP calls against the v3 objects API and the v4 associations API.
//!
//! # Architecture
//!
//! The gateway holds a single `reqwest::Client` with connection pooling,
//! a per-request timeout, and default headers carrying the private app
//! token. It is stateless beyond that client: every port operation issues
//! exactly one outbound HTTP call, with no retries and no caching.
//!
//! # Configuration
//!
//! The adapter is configured via `HubSpotConfig`:
//!
//! ```rust,ignore
//! let config = HubSpotConfig::new(std::env::var("HUBSPOT_PRIVATE_APP_TOKEN")?)
//!     .base_url("https://api.hubapi.com")
//!     .timeout(Duration::from_secs(30));
//! let gateway = HubSpotGateway::new(config)?;
//! ```
//!
//! # Error Handling
//!
//! Remote and transport failures map onto `CrmError` variants:
//! - non-2xx response -> `CrmError::RemoteApi { status, body }`
//! - 404 on the read paths -> `Ok(None)`, never an error
//! - DNS/connect/timeout -> `CrmError::Network`
//! - undecodable 2xx body -> `CrmError::Decode`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use core_kernel::{
    AssociationRequest, CrmError, HealthCheckResult, HealthCheckable, PropertyMap, RemoteObject,
};
use domain_objects::CrmObjectPort;

/// Default base URL of the HubSpot REST API
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Configuration for the HubSpot gateway
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_hubspot::HubSpotConfig;
///
/// let config = HubSpotConfig::new("pat-na1-example")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "https://api.hubapi.com");
/// ```
#[derive(Debug, Clone)]
pub struct HubSpotConfig {
    /// Base URL of the HubSpot API, without a trailing slash
    pub base_url: String,
    /// Private app token placed in the Authorization header of every call
    pub private_app_token: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HubSpotConfig {
    /// Creates a configuration for the given private app token
    ///
    /// # Arguments
    ///
    /// * `token` - HubSpot private app token
    ///
    /// # Returns
    ///
    /// A new `HubSpotConfig` pointing at the public HubSpot API with a
    /// 30 second request timeout
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            private_app_token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the base URL (trailing slashes are trimmed)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout (default: 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// HubSpot adapter implementing the CrmObjectPort trait
///
/// Connects to HubSpot's CRM REST API to manage objects and associations.
/// Object reads that hit a remote 404 surface as `Ok(None)` so callers can
/// treat "no such record" as an ordinary outcome.
#[derive(Debug)]
pub struct HubSpotGateway {
    client: reqwest::Client,
    config: HubSpotConfig,
}

impl HubSpotGateway {
    /// Creates a new gateway with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `CrmError::Configuration` when the token cannot be used as a
    /// header value or the HTTP client cannot be constructed.
    pub fn new(config: HubSpotConfig) -> Result<Self, CrmError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.private_app_token))
            .map_err(|e| CrmError::configuration(format!("invalid private app token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CrmError::configuration(format!("failed to build HTTP client: {e}")))?;

        info!(base_url = %config.base_url, "HubSpot gateway initialized");

        Ok(Self { client, config })
    }

    /// Returns the base URL the gateway talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn object_url(&self, object_type: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!(
                "{}/crm/v3/objects/{}/{}",
                self.config.base_url, object_type, id
            ),
            None => format!("{}/crm/v3/objects/{}", self.config.base_url, object_type),
        }
    }

    fn search_url(&self, object_type: &str) -> String {
        format!(
            "{}/crm/v3/objects/{}/search",
            self.config.base_url, object_type
        )
    }

    fn association_create_url(&self, from_type: &str, to_type: &str) -> String {
        format!(
            "{}/crm/v4/associations/{}/{}/batch/create",
            self.config.base_url, from_type, to_type
        )
    }

    fn association_list_url(&self, object_type: &str, id: &str, to_type: &str) -> String {
        format!(
            "{}/crm/v4/objects/{}/{}/associations/{}",
            self.config.base_url, object_type, id, to_type
        )
    }

    /// Converts a non-success response into `CrmError::RemoteApi`
    async fn error_from_response(response: reqwest::Response) -> CrmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        error!(status, body = %body, "HubSpot API request failed");
        CrmError::remote_api(status, body)
    }

    /// Reads a success response as JSON, tolerating empty bodies
    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, CrmError> {
        let text = response.text().await.map_err(decode_error)?;
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| CrmError::decode(e.to_string()))
    }
}

/// Maps transport-level reqwest failures onto the uniform CRM error
fn transport_error(error: reqwest::Error) -> CrmError {
    if error.is_timeout() {
        CrmError::network(format!("request timed out: {error}"))
    } else if error.is_connect() {
        CrmError::network(format!("connection failed: {error}"))
    } else {
        CrmError::network(error.to_string())
    }
}

fn decode_error(error: reqwest::Error) -> CrmError {
    CrmError::decode(error.to_string())
}

/// Response shape of the v3 search endpoint; only the results matter here
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RemoteObject>,
}

#[async_trait]
impl HealthCheckable for HubSpotGateway {
    /// Reports configuration readiness without issuing a remote call
    async fn health_check(&self) -> HealthCheckResult {
        if self.config.private_app_token.is_empty() {
            HealthCheckResult::degraded("hubspot-gateway", "private app token is not configured")
        } else {
            HealthCheckResult::healthy("hubspot-gateway")
        }
    }
}

#[async_trait]
impl CrmObjectPort for HubSpotGateway {
    async fn fetch_by_id(
        &self,
        object_type: &str,
        id: &str,
    ) -> Result<Option<RemoteObject>, CrmError> {
        let url = self.object_url(object_type, Some(id));
        debug!(%url, "fetching object");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let object = response
            .json::<RemoteObject>()
            .await
            .map_err(decode_error)?;
        Ok(Some(object))
    }

    async fn create(
        &self,
        object_type: &str,
        properties: PropertyMap,
    ) -> Result<RemoteObject, CrmError> {
        let url = self.object_url(object_type, None);
        debug!(%url, "creating object");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "properties": properties }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<RemoteObject>().await.map_err(decode_error)
    }

    async fn update(
        &self,
        object_type: &str,
        id: &str,
        properties: PropertyMap,
    ) -> Result<RemoteObject, CrmError> {
        let url = self.object_url(object_type, Some(id));
        debug!(%url, "updating object");

        let response = self
            .client
            .patch(&url)
            .json(&json!({ "properties": properties }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<RemoteObject>().await.map_err(decode_error)
    }

    async fn search_by_property(
        &self,
        object_type: &str,
        property: &str,
        value: &str,
    ) -> Result<Option<RemoteObject>, CrmError> {
        let url = self.search_url(object_type);
        debug!(%url, property, "searching objects");

        let body = json!({
            "filterGroups": [
                {
                    "filters": [
                        {
                            "propertyName": property,
                            "operator": "EQ",
                            "value": value
                        }
                    ]
                }
            ],
            "limit": 1
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let search: SearchResponse = response.json().await.map_err(decode_error)?;
        Ok(search.results.into_iter().next())
    }

    async fn create_association(
        &self,
        request: &AssociationRequest,
    ) -> Result<serde_json::Value, CrmError> {
        let url =
            self.association_create_url(&request.from_object_type, &request.to_object_type);
        debug!(%url, "creating association");

        let body = json!({
            "inputs": [
                {
                    "from": { "id": request.from_object_id },
                    "to": { "id": request.to_object_id },
                    "type": request.association_type_id
                }
            ]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Self::read_json(response).await
    }

    async fn get_associations(
        &self,
        object_type: &str,
        object_id: &str,
        to_object_type: &str,
    ) -> Result<serde_json::Value, CrmError> {
        let url = self.association_list_url(object_type, object_id, to_object_type);
        debug!(%url, "listing associations");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HubSpotGateway {
        let config = HubSpotConfig::new("test-token").base_url("https://hubspot.local");
        HubSpotGateway::new(config).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = HubSpotConfig::new("token")
            .base_url("https://example.test/")
            .timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.private_app_token, "token");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_object_urls() {
        let gateway = gateway();

        assert_eq!(
            gateway.object_url("contacts", None),
            "https://hubspot.local/crm/v3/objects/contacts"
        );
        assert_eq!(
            gateway.object_url("contacts", Some("123")),
            "https://hubspot.local/crm/v3/objects/contacts/123"
        );
        assert_eq!(
            gateway.search_url("companies"),
            "https://hubspot.local/crm/v3/objects/companies/search"
        );
    }

    #[test]
    fn test_association_urls() {
        let gateway = gateway();

        assert_eq!(
            gateway.association_create_url("contact", "company"),
            "https://hubspot.local/crm/v4/associations/contact/company/batch/create"
        );
        assert_eq!(
            gateway.association_list_url("contact", "123", "company"),
            "https://hubspot.local/crm/v4/objects/contact/123/associations/company"
        );
    }

    #[tokio::test]
    async fn test_health_check_degraded_without_token() {
        let unconfigured = HubSpotGateway::new(HubSpotConfig::new("")).unwrap();
        let result = unconfigured.health_check().await;
        assert!(!result.is_healthy());
        assert!(result.message.unwrap().contains("token"));

        let configured = gateway().health_check().await;
        assert!(configured.is_healthy());
    }
}
