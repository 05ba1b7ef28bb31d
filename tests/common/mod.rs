//! In-process mock of the identity provider and management API.
//!
//! Each test starts its own server on `127.0.0.1:0`, so tests can run in
//! parallel. The mock issues numbered tokens (`access-1`, `access-2`, …),
//! rejects requests carrying unknown tokens and serves a small fixture of
//! grants, applications and topics.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use parking_lot::Mutex;
use platform_client::{AuthDescriptor, PlatformApiConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const REALM: &str = "test";
pub const USERNAME: &str = "kenneth@example.com";
pub const PASSWORD: &str = "kafka-Pa55w0rd";
pub const CLIENT_ID: &str = "self-service";

pub const BILLING_APP: &str = "0a6b4fc6-6c3f-4f0e-9f4b-1fb0c0e1f7a2";
pub const AUDIT_APP: &str = "1b7c5ad7-7d40-4a1f-8a5c-2ac1d1f2a8b3";
pub const DEV_ENV: &str = "5d7a5e0c-5b9d-4a55-8a5d-a0f5b3c9c1d3";
pub const PROD_ENV: &str = "6e8b6f1d-6cae-4b66-9b6e-b1a6c4dad2e4";
pub const INVOICES_TOPIC: &str = "c1f1f1de-8a8e-4b7b-9e67-1e9f0d6c7a44";
pub const APPROVED_GRANT: &str = "7d0f7b62-3b1e-4c43-a0c4-3c2f0b7b0f11";
pub const INVOICE_SCHEMA_V1: &str = "b2c3d4e5-f6a7-4b8c-9d0e-1f2a3b4c5d6e";

/// Shared state the handlers read and tests inspect
pub struct MockState {
    /// `grant_type` of every token request, in order
    pub token_requests: Mutex<Vec<String>>,
    pub valid_tokens: Mutex<HashSet<String>>,
    pub valid_refresh_tokens: Mutex<HashSet<String>>,
    /// Query parameters of every grant lookup, in order
    pub grant_queries: Mutex<Vec<HashMap<String, String>>>,
    /// `METHOD path?query` of every management API request, in order
    pub api_requests: Mutex<Vec<String>>,
    /// Number of upcoming `GET /topics` calls that answer 503
    pub topic_failures: AtomicU32,
    pub topic_requests: AtomicU32,
    pub token_lifetime_secs: AtomicI64,
    issued: AtomicU32,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            token_requests: Mutex::new(Vec::new()),
            valid_tokens: Mutex::new(HashSet::new()),
            valid_refresh_tokens: Mutex::new(HashSet::new()),
            grant_queries: Mutex::new(Vec::new()),
            api_requests: Mutex::new(Vec::new()),
            topic_failures: AtomicU32::new(0),
            topic_requests: AtomicU32::new(0),
            token_lifetime_secs: AtomicI64::new(300),
            issued: AtomicU32::new(0),
        }
    }
}

impl MockState {
    /// Forget every issued access token, as if the IdP restarted
    pub fn revoke_access_tokens(&self) {
        self.valid_tokens.lock().clear();
    }

    pub fn grant_types(&self) -> Vec<String> {
        self.token_requests.lock().clone()
    }

    pub fn api_requests(&self) -> Vec<String> {
        self.api_requests.lock().clone()
    }

    /// Most recent management API request, e.g. `GET /api/environments`
    pub fn last_api_request(&self) -> Option<String> {
        self.api_requests.lock().last().cloned()
    }
}

pub struct MockPlatform {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockPlatform {
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    pub async fn start_with(state: MockState) -> Self {
        let state = Arc::new(state);
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock platform failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}/api"),
            state,
            handle,
        }
    }

    /// Client configuration pointing at this mock with valid credentials
    pub fn api_config(&self) -> PlatformApiConfig {
        PlatformApiConfig {
            base_url: self.base_url.clone(),
            realm: REALM.to_string(),
            auth: AuthDescriptor::new(USERNAME, PASSWORD, CLIENT_ID).with_scopes(["openid"]),
            timeout_ms: 5000,
            max_retries: 3,
            retry_backoff_ms: 10,
        }
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route(
            "/auth/realms/:realm/protocol/openid-connect/token",
            post(token),
        )
        .route("/api/actuator/health", get(health))
        .route("/api/access_grants/search/findByAttributes", get(find_grants))
        .route("/api/access_grants/:uid", get(get_grant))
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/api/applications/search/findByName",
            get(find_applications_by_name),
        )
        .route(
            "/api/applications/:uid",
            get(get_application).delete(delete_application),
        )
        .route("/api/environments", get(list_environments))
        .route("/api/environments/:uid", get(get_environment))
        .route("/api/topics", get(list_topics).post(create_topic))
        .route("/api/application_deployments", get(list_deployments))
        .route(
            "/api/application_deployments/search/findByApplicationAndEnvironment",
            get(find_deployment),
        )
        .route(
            "/api/application_principals/search/findByApplication",
            get(find_principals),
        )
        .route("/api/schema_versions", get(list_schema_versions))
        .route("/api/schema_versions/:uid", get(get_schema_version))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(
    State(state): State<Arc<MockState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if path.starts_with("/api/") {
        let target = request
            .uri()
            .path_and_query()
            .map_or(path, |pq| pq.as_str());
        let line = format!("{} {}", request.method(), target);
        state.api_requests.lock().push(line);
    }
    next.run(request).await
}

// ===================================================================================
// IDENTITY PROVIDER
// ===================================================================================

async fn token(
    State(state): State<Arc<MockState>>,
    Path(realm): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let grant_type = form.get("grant_type").cloned().unwrap_or_default();
    state.token_requests.lock().push(grant_type.clone());

    let accepted = realm == REALM
        && form.get("client_id").map(String::as_str) == Some(CLIENT_ID)
        && match grant_type.as_str() {
            "password" => {
                form.get("username").map(String::as_str) == Some(USERNAME)
                    && form.get("password").map(String::as_str) == Some(PASSWORD)
            }
            "refresh_token" => form
                .get("refresh_token")
                .is_some_and(|rt| state.valid_refresh_tokens.lock().contains(rt)),
            _ => false,
        };

    if !accepted {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid user credentials"
            })),
        )
            .into_response();
    }

    let n = state.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let access_token = format!("access-{n}");
    let refresh_token = format!("refresh-{n}");
    state.valid_tokens.lock().insert(access_token.clone());
    state.valid_refresh_tokens.lock().insert(refresh_token.clone());

    Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": state.token_lifetime_secs.load(Ordering::SeqCst),
        "refresh_token": refresh_token,
        "scope": form.get("scope").cloned().unwrap_or_default(),
    }))
    .into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if state.valid_tokens.lock().contains(token) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED.into_response()),
    }
}

// ===================================================================================
// MANAGEMENT API
// ===================================================================================

async fn health() -> Json<Value> {
    Json(json!({"status": "UP"}))
}

fn grant_fixture() -> Vec<Value> {
    vec![
        json!({
            "uid": APPROVED_GRANT,
            "status": "APPROVED",
            "application": {"uid": BILLING_APP, "name": "billing"},
            "environment": {"uid": DEV_ENV, "name": "dev"},
            "topic": {"uid": INVOICES_TOPIC, "name": "invoices"}
        }),
        json!({
            "uid": "8e108c73-4c2f-4d54-b1d5-4d301c8c1022",
            "status": "PENDING",
            "application": {"uid": BILLING_APP, "name": "billing"},
            "environment": {"uid": PROD_ENV, "name": "prod"},
            "topic": {"uid": INVOICES_TOPIC, "name": "invoices"}
        }),
        json!({
            "uid": "9f219d84-5d30-4e65-82e6-5e412d9d2133",
            "status": "APPROVED",
            "application": {"uid": AUDIT_APP, "name": "audit"},
            "environment": {"uid": DEV_ENV, "name": "dev"},
            "topic": {"uid": INVOICES_TOPIC, "name": "invoices"}
        }),
    ]
}

async fn find_grants(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state.grant_queries.lock().push(params.clone());

    let matches_ref = |grant: &Value, key: &str| match params.get(key) {
        Some(uid) => grant[key]["uid"] == *uid.as_str(),
        None => true,
    };

    let grants: Vec<Value> = grant_fixture()
        .into_iter()
        .filter(|g| matches_ref(g, "application"))
        .filter(|g| matches_ref(g, "environment"))
        .filter(|g| matches_ref(g, "topic"))
        .filter(|g| match params.get("status") {
            Some(status) => g["status"] == *status.as_str(),
            None => true,
        })
        .collect();

    let total = grants.len();
    Json(json!({
        "_embedded": {"access_grants": grants},
        "page": {"size": 20, "totalElements": total, "totalPages": 1, "number": 0}
    }))
    .into_response()
}

async fn get_grant(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    match grant_fixture().into_iter().find(|g| g["uid"] == *uid.as_str()) {
        Some(grant) => Json(grant).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn billing_application() -> Value {
    json!({
        "uid": BILLING_APP,
        "name": "Billing Service",
        "shortName": "billing",
        "applicationId": "io.example.billing",
        "applicationType": "Custom",
        "visibility": "Private"
    })
}

async fn list_applications(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"_embedded": {"applications": [billing_application()]}})).into_response()
}

async fn find_applications_by_name(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let app = billing_application();
    let matches: Vec<Value> = match params.get("name") {
        Some(name) if app["name"] == *name.as_str() => vec![app],
        _ => Vec::new(),
    };
    Json(json!({"_embedded": {"applications": matches}})).into_response()
}

async fn create_application(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let application = json!({
        "uid": "e3b3b3f0-ac0a-4d9d-9089-3ab1f28e9c66",
        "name": body["name"],
        "shortName": body["shortName"],
        "applicationId": body["applicationId"],
        "applicationType": body["applicationType"],
        "visibility": body["visibility"],
        "owners": {"uid": body["owners"], "name": "payments-team"}
    });
    (StatusCode::CREATED, Json(application)).into_response()
}

async fn get_application(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if uid == BILLING_APP {
        Json(billing_application()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn delete_application(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if uid == BILLING_APP {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

fn dev_environment() -> Value {
    json!({
        "uid": DEV_ENV,
        "name": "development",
        "shortName": "dev",
        "visibility": "Public",
        "authorizationIssuer": "Auto"
    })
}

async fn list_environments(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({
        "_embedded": {"environments": [
            dev_environment(),
            {"uid": PROD_ENV, "name": "production", "shortName": "prod", "authorizationIssuer": "Stream owner"}
        ]}
    }))
    .into_response()
}

async fn get_environment(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if uid == DEV_ENV {
        Json(dev_environment()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn list_topics(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state.topic_requests.fetch_add(1, Ordering::SeqCst);

    let remaining = state.topic_failures.load(Ordering::SeqCst);
    if remaining > 0 {
        state.topic_failures.store(remaining - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "cluster unavailable").into_response();
    }

    Json(json!({
        "_embedded": {"topics": [{
            "uid": INVOICES_TOPIC,
            "name": "invoices",
            "keyType": "String",
            "valueType": "AVRO",
            "retentionPolicy": "compact"
        }]}
    }))
    .into_response()
}

async fn create_topic(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let topic = json!({
        "uid": "d2a2a2ef-9b9f-4c8c-8f78-2fa0e17d8b55",
        "name": body["name"],
        "keyType": body["keyType"],
        "valueType": body["valueType"],
        "retentionPolicy": body["retentionPolicy"],
        "owners": {"uid": body["owners"], "name": "payments-team"}
    });
    (StatusCode::CREATED, Json(topic)).into_response()
}

async fn list_deployments(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({
        "_embedded": {"application_deployments": [{
            "uid": "f4c4c4a1-bd1b-4eae-a19a-4bc2039fad77",
            "application": {"uid": BILLING_APP, "name": "billing"},
            "environment": {"uid": DEV_ENV, "name": "dev"},
            "deploymentStatus": "Running"
        }]}
    }))
    .into_response()
}

async fn find_deployment(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    StatusCode::NOT_FOUND.into_response()
}

async fn find_principals(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    // No principals registered: the API leaves out _embedded entirely
    Json(json!({"page": {"size": 20, "totalElements": 0, "totalPages": 0, "number": 0}}))
        .into_response()
}

fn invoice_schema_v1() -> Value {
    json!({
        "uid": INVOICE_SCHEMA_V1,
        "version": "1.0.0",
        "schema": {
            "uid": "c3d4e5f6-a7b8-4c9d-8e0f-2a3b4c5d6e7f",
            "name": "Invoice",
            "namespace": "io.example.billing"
        },
        "schemaBody": "{\"type\":\"record\",\"name\":\"Invoice\",\"fields\":[]}"
    })
}

async fn list_schema_versions(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"_embedded": {"schema_versions": [invoice_schema_v1()]}})).into_response()
}

async fn get_schema_version(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if uid == INVOICE_SCHEMA_V1 {
        Json(invoice_schema_v1()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
