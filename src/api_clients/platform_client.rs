//! # Platform API Client
//!
//! HTTP client for the self-service management API. Covers access grants,
//! applications, environments, topics, application deployments, principals,
//! schema versions and the actuator health endpoint.
//!
//! Every request carries a bearer token obtained through the OAuth2 password
//! grant (see [`crate::auth`]). A `401` drops the cached token and the request
//! is replayed once with fresh credentials.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::{AccessToken, AuthDescriptor, TokenProvider};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AccessGrant, Application, ApplicationDeployment, ApplicationPrincipal, ApplicationRequest,
    Collection, Environment, GrantQuery, SchemaVersion, Topic, TopicRequest,
};

/// Configuration for the platform API client
///
/// # Examples
///
/// ```rust
/// use platform_client::{AuthDescriptor, PlatformApiConfig};
///
/// let config = PlatformApiConfig {
///     base_url: "https://platform.example.com/api".to_string(),
///     realm: "acme".to_string(),
///     auth: AuthDescriptor::new("kenneth@example.com", "secret", "self-service"),
///     ..Default::default()
/// };
/// assert_eq!(config.timeout_ms, 30000);
/// assert_eq!(config.max_retries, 3);
/// ```
#[derive(Debug, Clone)]
pub struct PlatformApiConfig {
    /// Base URL of the management API, including its path prefix (e.g. "/api")
    pub base_url: String,
    /// Identity provider realm, used to derive the token endpoint
    pub realm: String,
    /// OAuth2 password-grant credentials
    pub auth: AuthDescriptor,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum attempts for GET requests
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub retry_backoff_ms: u64,
}

impl Default for PlatformApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            realm: "platform".to_string(),
            auth: AuthDescriptor::default(),
            timeout_ms: 30000,
            max_retries: 3,
            retry_backoff_ms: 1000,
        }
    }
}

impl From<&ClientConfig> for PlatformApiConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            realm: config.api.realm.clone(),
            auth: config.auth.clone(),
            timeout_ms: config.api.timeout_ms,
            max_retries: config.api.max_retries,
            ..Default::default()
        }
    }
}

/// HTTP client for the self-service management API
///
/// Cloning is cheap; clones share the HTTP connection pool and the token cache.
///
/// # Examples
///
/// ```rust,no_run
/// use platform_client::{AuthDescriptor, GrantQuery, PlatformApiClient, PlatformApiConfig};
///
/// # async fn example() -> platform_client::ClientResult<()> {
/// let config = PlatformApiConfig {
///     base_url: "https://platform.example.com/api".to_string(),
///     realm: "acme".to_string(),
///     auth: AuthDescriptor::new("kenneth@example.com", "secret", "self-service"),
///     ..Default::default()
/// };
///
/// let client = PlatformApiClient::connect(config).await?;
/// let grants = client.get_access_grants(&GrantQuery::new()).await?;
/// println!("{} grants", grants.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PlatformApiClient {
    client: Client,
    config: PlatformApiConfig,
    base_url: Url,
    tokens: Arc<TokenProvider>,
}

impl std::fmt::Debug for PlatformApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("realm", &self.config.realm)
            .field("timeout_ms", &self.config.timeout_ms)
            .field("max_retries", &self.config.max_retries)
            .field("token_url", &self.tokens.token_url().as_str())
            .finish()
    }
}

impl PlatformApiClient {
    /// Create a client without contacting the identity provider
    ///
    /// The first request acquires a token. Use [`PlatformApiClient::connect`]
    /// to fail fast on bad credentials instead.
    pub fn new(config: PlatformApiConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("platform-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ClientError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        let token_url = config.auth.resolve_token_url(&base_url, &config.realm)?;
        let tokens = TokenProvider::new(client.clone(), config.auth.clone(), token_url)?;

        info!(
            base_url = %base_url,
            realm = %config.realm,
            timeout_ms = config.timeout_ms,
            token_url = %tokens.token_url(),
            "Created platform API client"
        );

        Ok(Self {
            client,
            config,
            base_url,
            tokens: Arc::new(tokens),
        })
    }

    /// Create a client and authenticate immediately
    pub async fn connect(config: PlatformApiConfig) -> ClientResult<Self> {
        let client = Self::new(config)?;
        client.tokens.login().await?;
        Ok(client)
    }

    /// Get the configured base URL for debugging/logging
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Get the configured timeout for debugging/logging
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms
    }

    /// Current access token, renewed if necessary
    pub async fn access_token(&self) -> ClientResult<AccessToken> {
        self.tokens.token().await
    }

    // ===================================================================================
    // ACCESS GRANTS
    // ===================================================================================

    /// Look up access grants matching the given attributes
    ///
    /// GET /access_grants/search/findByAttributes
    pub async fn get_access_grants(
        &self,
        query: &GrantQuery,
    ) -> ClientResult<Collection<AccessGrant>> {
        let mut url = self.url_for("access_grants/search/findByAttributes")?;
        let params = query.query_pairs();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &params {
                pairs.append_pair(key, value);
            }
        }

        debug!(url = %url, ?query, "Looking up access grants");

        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "get access grants").await
    }

    /// GET /`access_grants/{uid`}
    pub async fn get_access_grant(&self, uid: Uuid) -> ClientResult<AccessGrant> {
        let url = self.url_for(&format!("access_grants/{}", uid))?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_lookup(response, "Access grant", uid).await
    }

    // ===================================================================================
    // APPLICATIONS
    // ===================================================================================

    /// GET /applications
    pub async fn get_applications(&self) -> ClientResult<Collection<Application>> {
        let url = self.url_for("applications")?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list applications").await
    }

    /// GET /`applications/{uid`}
    pub async fn get_application(&self, uid: Uuid) -> ClientResult<Application> {
        let url = self.url_for(&format!("applications/{}", uid))?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_lookup(response, "Application", uid).await
    }

    /// GET /applications/search/findByName
    pub async fn find_application_by_name(
        &self,
        name: &str,
    ) -> ClientResult<Collection<Application>> {
        let mut url = self.url_for("applications/search/findByName")?;
        url.query_pairs_mut().append_pair("name", name);

        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "find application by name")
            .await
    }

    /// POST /applications
    pub async fn create_application(
        &self,
        request: &ApplicationRequest,
    ) -> ClientResult<Application> {
        let url = self.url_for("applications")?;

        debug!(
            url = %url,
            name = %request.name,
            application_id = %request.application_id,
            "Creating application"
        );

        let response = self.execute(Method::POST, url, Some(request)).await?;
        let application: Application = self.handle_response(response, "create application").await?;

        info!(
            uid = %application.uid,
            name = %application.name,
            "Successfully created application"
        );
        Ok(application)
    }

    /// DELETE /`applications/{uid`}
    pub async fn delete_application(&self, uid: Uuid) -> ClientResult<()> {
        let url = self.url_for(&format!("applications/{}", uid))?;
        let response = self.execute::<()>(Method::DELETE, url, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Application", uid.to_string()));
        }
        self.expect_success(response, "delete application").await?;
        info!(uid = %uid, "Successfully deleted application");
        Ok(())
    }

    // ===================================================================================
    // ENVIRONMENTS
    // ===================================================================================

    /// GET /environments
    pub async fn get_environments(&self) -> ClientResult<Collection<Environment>> {
        let url = self.url_for("environments")?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list environments").await
    }

    /// GET /`environments/{uid`}
    pub async fn get_environment(&self, uid: Uuid) -> ClientResult<Environment> {
        let url = self.url_for(&format!("environments/{}", uid))?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_lookup(response, "Environment", uid).await
    }

    // ===================================================================================
    // TOPICS
    // ===================================================================================

    /// GET /topics
    pub async fn get_topics(&self) -> ClientResult<Collection<Topic>> {
        let url = self.url_for("topics")?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list topics").await
    }

    /// GET /`topics/{uid`}
    pub async fn get_topic(&self, uid: Uuid) -> ClientResult<Topic> {
        let url = self.url_for(&format!("topics/{}", uid))?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_lookup(response, "Topic", uid).await
    }

    /// POST /topics
    pub async fn create_topic(&self, request: &TopicRequest) -> ClientResult<Topic> {
        request.validate().map_err(ClientError::InvalidInput)?;
        let url = self.url_for("topics")?;

        debug!(url = %url, name = %request.name, "Creating topic");

        let response = self.execute(Method::POST, url, Some(request)).await?;
        let topic: Topic = self.handle_response(response, "create topic").await?;

        info!(uid = %topic.uid, name = %topic.name, "Successfully created topic");
        Ok(topic)
    }

    // ===================================================================================
    // APPLICATION DEPLOYMENTS
    // ===================================================================================

    /// GET /application_deployments
    pub async fn get_application_deployments(
        &self,
    ) -> ClientResult<Collection<ApplicationDeployment>> {
        let url = self.url_for("application_deployments")?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list application deployments")
            .await
    }

    /// GET /application_deployments/search/findByApplicationAndEnvironment
    ///
    /// Returns `None` when the application has no deployment in that environment.
    pub async fn find_application_deployment(
        &self,
        application: Uuid,
        environment: Uuid,
    ) -> ClientResult<Option<ApplicationDeployment>> {
        let mut url = self.url_for("application_deployments/search/findByApplicationAndEnvironment")?;
        url.query_pairs_mut()
            .append_pair("application", &application.to_string())
            .append_pair("environment", &environment.to_string());

        let response = self.execute::<()>(Method::GET, url, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(
                application = %application,
                environment = %environment,
                "No application deployment found"
            );
            return Ok(None);
        }
        let deployment = self
            .handle_response(response, "find application deployment")
            .await?;
        Ok(Some(deployment))
    }

    // ===================================================================================
    // PRINCIPALS
    // ===================================================================================

    /// GET /application_principals/search/findByApplication
    pub async fn get_application_principals(
        &self,
        application: Uuid,
    ) -> ClientResult<Collection<ApplicationPrincipal>> {
        let mut url = self.url_for("application_principals/search/findByApplication")?;
        url.query_pairs_mut()
            .append_pair("application", &application.to_string());

        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list application principals")
            .await
    }

    // ===================================================================================
    // SCHEMAS
    // ===================================================================================

    /// GET /schema_versions
    pub async fn get_schema_versions(&self) -> ClientResult<Collection<SchemaVersion>> {
        let url = self.url_for("schema_versions")?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_response(response, "list schema versions").await
    }

    /// GET /`schema_versions/{uid`}
    pub async fn get_schema_version(&self, uid: Uuid) -> ClientResult<SchemaVersion> {
        let url = self.url_for(&format!("schema_versions/{}", uid))?;
        let response = self.execute::<()>(Method::GET, url, None).await?;
        self.handle_lookup(response, "Schema version", uid).await
    }

    // ===================================================================================
    // HEALTH
    // ===================================================================================

    /// Check if the management API is up
    ///
    /// GET /actuator/health (unauthenticated)
    pub async fn health_check(&self) -> ClientResult<()> {
        let url = self.url_for("actuator/health")?;

        debug!(url = %url, "Checking platform API health");

        let response = self.client.get(url).send().await?;
        if response.status().is_success() {
            debug!("Platform API health check passed");
            Ok(())
        } else {
            let status = response.status();
            warn!(status = %status, "Platform API health check failed");
            Err(ClientError::api_error(
                status.as_u16(),
                format!("Health check failed with status: {}", status),
            ))
        }
    }

    // ===================================================================================
    // UTILITY METHODS
    // ===================================================================================

    fn url_for(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::config_error(format!("Failed to construct URL: {}", e)))
    }

    /// Send an authenticated request
    ///
    /// GETs are retried with exponential backoff on network errors and 5xx.
    /// Any method is replayed once after a 401 with a fresh token.
    async fn execute<B>(&self, method: Method, url: Url, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let max_attempts = if method == Method::GET {
            self.config.max_retries.max(1)
        } else {
            1
        };
        let mut attempt = 0;
        let mut reauthenticated = false;

        loop {
            attempt += 1;

            let bearer = self.tokens.bearer().await?;
            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .header(AUTHORIZATION, bearer);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(resp) if resp.status() == StatusCode::UNAUTHORIZED && !reauthenticated => {
                    warn!(url = %url, "Request unauthorized, re-authenticating");
                    self.tokens.invalidate();
                    reauthenticated = true;
                    attempt -= 1;
                    continue;
                }
                Ok(resp) if resp.status().is_server_error() && attempt < max_attempts => {
                    warn!(
                        url = %url,
                        status = %resp.status(),
                        retry = attempt,
                        max_retries = max_attempts,
                        "Server error, will retry"
                    );
                }
                Ok(resp) => return Ok(resp),
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < max_attempts => {
                    warn!(
                        url = %url,
                        error = %e,
                        retry = attempt,
                        max_retries = max_attempts,
                        "Network error, will retry"
                    );
                }
                Err(e) => {
                    error!(url = %url, error = %e, "Request failed");
                    return Err(e.into());
                }
            }

            // Exponential backoff: base, 2*base, 4*base, ...
            let delay = Duration::from_millis(
                self.config
                    .retry_backoff_ms
                    .saturating_mul(1 << (attempt - 1).min(16)),
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Handle HTTP response with proper error handling and deserialization
    async fn handle_response<T>(&self, response: Response, operation: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            let result = response.json::<T>().await.map_err(|e| {
                ClientError::invalid_response(operation, format!("Failed to parse response: {}", e))
            })?;

            debug!("Successfully completed operation: {}", operation);
            Ok(result)
        } else {
            Err(self.error_from(response, operation).await)
        }
    }

    /// Like `handle_response`, mapping 404 to [`ClientError::NotFound`]
    async fn handle_lookup<T>(&self, response: Response, resource: &str, uid: Uuid) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        if response.status() == StatusCode::NOT_FOUND {
            debug!(resource = resource, uid = %uid, "Resource not found");
            return Err(ClientError::not_found(resource, uid.to_string()));
        }
        self.handle_response(response, &format!("get {}", resource.to_lowercase()))
            .await
    }

    async fn expect_success(&self, response: Response, operation: &str) -> ClientResult<()> {
        if response.status().is_success() {
            debug!("Successfully completed operation: {}", operation);
            Ok(())
        } else {
            Err(self.error_from(response, operation).await)
        }
    }

    async fn error_from(&self, response: Response, operation: &str) -> ClientError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(status = %status, error = %error_text, "Failed operation: {}", operation);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ClientError::auth_error(format!("HTTP {}: {}", status, error_text));
        }
        ClientError::api_error(status.as_u16(), error_text)
    }
}

/// Parse the base URL and make sure relative joins keep its path prefix
fn normalize_base_url(raw: &str) -> ClientResult<Url> {
    let mut base_url = Url::parse(raw)
        .map_err(|e| ClientError::config_error(format!("Invalid base URL '{}': {}", raw, e)))?;

    if base_url.cannot_be_a_base() {
        return Err(ClientError::config_error(format!(
            "Base URL '{}' cannot be used as a base",
            raw
        )));
    }

    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url)
}
