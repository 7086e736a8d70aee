//! In-memory stand-in for the HubSpot REST API
//!
//! `StubHubSpot` runs a real axum server on an ephemeral local port and
//! emulates the endpoints the connector's gateway talks to: v3 object CRUD
//! and search, and v4 associations. Responses use HubSpot's wire shapes
//! (string ids, camelCase millisecond timestamps) so gateway tests exercise
//! the same decoding paths as production traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    middleware::{self as axum_middleware, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;

/// Object types the stub recognizes; anything else gets a remote-style 404
const KNOWN_OBJECT_TYPES: &[&str] = &["contacts", "companies", "tickets"];

#[derive(Debug, Clone)]
struct StoredObject {
    id: String,
    properties: serde_json::Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived: bool,
}

impl StoredObject {
    fn wire_json(&self) -> Value {
        json!({
            "id": self.id,
            "properties": self.properties,
            "createdAt": self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "updatedAt": self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "archived": self.archived,
        })
    }
}

#[derive(Debug, Clone)]
struct StoredAssociation {
    from_type: String,
    from_id: String,
    to_type: String,
    to_id: String,
    type_id: String,
}

#[derive(Debug, Default)]
struct StubState {
    objects: RwLock<HashMap<String, Vec<StoredObject>>>,
    associations: RwLock<Vec<StoredAssociation>>,
    next_id: AtomicU64,
    hits: AtomicU64,
    required_token: Option<String>,
}

impl StubState {
    async fn insert(&self, object_type: &str, properties: serde_json::Map<String, Value>) -> StoredObject {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        let object = StoredObject {
            id: id.to_string(),
            properties,
            created_at: now,
            updated_at: now,
            archived: false,
        };
        self.objects
            .write()
            .await
            .entry(object_type.to_string())
            .or_default()
            .push(object.clone());
        object
    }
}

/// Builder for the stub server
#[derive(Debug, Default)]
pub struct StubHubSpot {
    required_token: Option<String>,
}

impl StubHubSpot {
    /// Creates a stub that accepts any Authorization header
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the stub reject requests whose bearer token differs
    pub fn require_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(token.into());
        self
    }

    /// Binds an ephemeral port and starts serving
    pub async fn spawn(self) -> StubHandle {
        let state = Arc::new(StubState {
            required_token: self.required_token,
            ..StubState::default()
        });

        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        StubHandle {
            base_url: format!("http://{addr}"),
            state,
        }
    }
}

/// Handle to a running stub, used to seed data and inspect traffic
pub struct StubHandle {
    /// Base URL to point the gateway at
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubHandle {
    /// Stores an object directly and returns its id
    pub async fn seed_object(&self, object_type: &str, properties: Value) -> String {
        let properties = properties.as_object().cloned().unwrap_or_default();
        self.state.insert(object_type, properties).await.id
    }

    /// Number of objects currently stored for a type
    pub async fn object_count(&self, object_type: &str) -> usize {
        self.state
            .objects
            .read()
            .await
            .get(object_type)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Properties the stub currently holds for an object
    pub async fn stored_properties(&self, object_type: &str, id: &str) -> Option<Value> {
        self.state
            .objects
            .read()
            .await
            .get(object_type)
            .and_then(|objects| objects.iter().find(|o| o.id == id))
            .map(|o| Value::Object(o.properties.clone()))
    }

    /// Total requests the stub has received
    pub fn hits(&self) -> u64 {
        self.state.hits.load(Ordering::Relaxed)
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/crm/v3/objects/:object_type", post(create_object))
        .route("/crm/v3/objects/:object_type/search", post(search_objects))
        .route(
            "/crm/v3/objects/:object_type/:id",
            get(fetch_object).patch(update_object),
        )
        .route(
            "/crm/v4/associations/:from_type/:to_type/batch/create",
            post(create_association),
        )
        .route(
            "/crm/v4/objects/:object_type/:id/associations/:to_type",
            get(list_associations),
        )
        .layer(axum_middleware::from_fn_with_state(state.clone(), intercept))
        .with_state(state)
}

/// Counts every request and enforces the bearer token when configured
async fn intercept(
    State(state): State<Arc<StubState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);

    if let Some(expected) = &state.required_token {
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value == format!("Bearer {expected}"))
            .unwrap_or(false);

        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "status": "error",
                    "message": "Authentication credentials not found",
                    "category": "INVALID_AUTHENTICATION",
                })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

fn unknown_object_type() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Unable to infer object type",
            "category": "OBJECT_NOT_FOUND",
        })),
    )
        .into_response()
}

fn object_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "resource not found",
            "category": "OBJECT_NOT_FOUND",
        })),
    )
        .into_response()
}

async fn create_object(
    State(state): State<Arc<StubState>>,
    Path(object_type): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !KNOWN_OBJECT_TYPES.contains(&object_type.as_str()) {
        return unknown_object_type();
    }

    let properties = body
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let object = state.insert(&object_type, properties).await;
    (StatusCode::CREATED, Json(object.wire_json())).into_response()
}

async fn fetch_object(
    State(state): State<Arc<StubState>>,
    Path((object_type, id)): Path<(String, String)>,
) -> Response {
    if !KNOWN_OBJECT_TYPES.contains(&object_type.as_str()) {
        return unknown_object_type();
    }

    let objects = state.objects.read().await;
    match objects
        .get(&object_type)
        .and_then(|objects| objects.iter().find(|o| o.id == id))
    {
        Some(object) => Json(object.wire_json()).into_response(),
        None => object_not_found(),
    }
}

async fn update_object(
    State(state): State<Arc<StubState>>,
    Path((object_type, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if !KNOWN_OBJECT_TYPES.contains(&object_type.as_str()) {
        return unknown_object_type();
    }

    let supplied = body
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let mut objects = state.objects.write().await;
    let object = objects
        .get_mut(&object_type)
        .and_then(|objects| objects.iter_mut().find(|o| o.id == id));

    match object {
        Some(object) => {
            for (key, value) in supplied {
                object.properties.insert(key, value);
            }
            object.updated_at = Utc::now();
            Json(object.wire_json()).into_response()
        }
        None => object_not_found(),
    }
}

async fn search_objects(
    State(state): State<Arc<StubState>>,
    Path(object_type): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !KNOWN_OBJECT_TYPES.contains(&object_type.as_str()) {
        return unknown_object_type();
    }

    let filter = &body["filterGroups"][0]["filters"][0];
    let property = filter["propertyName"].as_str().unwrap_or_default();
    let value = filter["value"].as_str().unwrap_or_default();
    let limit = body["limit"].as_u64().unwrap_or(10) as usize;

    let objects = state.objects.read().await;
    let results: Vec<Value> = objects
        .get(&object_type)
        .map(|objects| {
            objects
                .iter()
                .filter(|o| o.properties.get(property).and_then(Value::as_str) == Some(value))
                .take(limit)
                .map(StoredObject::wire_json)
                .collect()
        })
        .unwrap_or_default();

    Json(json!({ "total": results.len(), "results": results })).into_response()
}

async fn create_association(
    State(state): State<Arc<StubState>>,
    Path((from_type, to_type)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let input = &body["inputs"][0];
    let from_id = input["from"]["id"].as_str().unwrap_or_default().to_string();
    let to_id = input["to"]["id"].as_str().unwrap_or_default().to_string();
    let type_id = input["type"].as_str().unwrap_or_default().to_string();

    if from_id.is_empty() || to_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "invalid association input" })),
        )
            .into_response();
    }

    state.associations.write().await.push(StoredAssociation {
        from_type: from_type.clone(),
        from_id: from_id.clone(),
        to_type: to_type.clone(),
        to_id: to_id.clone(),
        type_id: type_id.clone(),
    });

    (
        StatusCode::CREATED,
        Json(json!({
            "status": "COMPLETE",
            "results": [
                {
                    "from": { "id": from_id },
                    "to": { "id": to_id },
                    "type": type_id,
                }
            ],
        })),
    )
        .into_response()
}

async fn list_associations(
    State(state): State<Arc<StubState>>,
    Path((object_type, id, to_type)): Path<(String, String, String)>,
) -> Response {
    let associations = state.associations.read().await;
    let results: Vec<Value> = associations
        .iter()
        .filter(|a| a.from_type == object_type && a.from_id == id && a.to_type == to_type)
        .map(|a| {
            json!({
                "toObjectId": a.to_id,
                "associationTypes": [
                    { "category": "USER_DEFINED", "typeId": a.type_id }
                ],
            })
        })
        .collect();

    Json(json!({ "results": results })).into_response()
}
