//! # OAuth2 Authentication
//!
//! Password-grant token acquisition against the platform's identity provider.
//! The [`TokenProvider`] caches the current access token, refreshes it shortly
//! before it expires and serializes refreshes so that concurrent requests
//! trigger a single round trip to the token endpoint.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Seconds before the reported expiry at which a token is treated as expired
const EXPIRY_SKEW_SECS: i64 = 30;

/// Upper bound applied to the server's `expires_in`
const MAX_TOKEN_LIFETIME_SECS: i64 = 86_400 * 365;

/// Credentials and token endpoint for the OAuth2 password grant
///
/// When `token_url` is empty it is derived from the API base URL and realm,
/// see [`AuthDescriptor::resolve_token_url`].
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthDescriptor {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub token_url: String,
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for AuthDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthDescriptor")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl AuthDescriptor {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the fields the token endpoint requires are present
    pub fn validate(&self) -> ClientResult<()> {
        let missing: Vec<&str> = [
            ("username", self.username.is_empty()),
            ("password", self.password.is_empty()),
            ("client_id", self.client_id.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(ClientError::config_error(format!(
                "Missing authentication settings: {}",
                missing.join(", ")
            )));
        }

        if !self.token_url.is_empty() {
            Url::parse(&self.token_url).map_err(|e| {
                ClientError::config_error(format!("Invalid token URL '{}': {}", self.token_url, e))
            })?;
        }

        Ok(())
    }

    /// Token endpoint to use for this descriptor
    ///
    /// An explicit `token_url` wins. Otherwise the Keycloak-style endpoint
    /// `/auth/realms/{realm}/protocol/openid-connect/token` on the API host is used.
    pub fn resolve_token_url(&self, base_url: &Url, realm: &str) -> ClientResult<Url> {
        if !self.token_url.is_empty() {
            return Url::parse(&self.token_url).map_err(|e| {
                ClientError::config_error(format!("Invalid token URL '{}': {}", self.token_url, e))
            });
        }

        if realm.is_empty() {
            return Err(ClientError::config_error(
                "Either a token URL or a realm is required",
            ));
        }

        base_url
            .join(&format!(
                "/auth/realms/{}/protocol/openid-connect/token",
                realm
            ))
            .map_err(|e| {
                ClientError::config_error(format!("Failed to construct token URL: {}", e))
            })
    }

    fn scope_param(&self) -> Option<String> {
        (!self.scopes.is_empty()).then(|| self.scopes.join(" "))
    }
}

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Error body defined by RFC 6749 section 5.2
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// A bearer token and the data needed to renew it
#[derive(Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> ClientResult<Self> {
        // Servers that omit expires_in get a conservative default
        let lifetime = response
            .expires_in
            .unwrap_or(60)
            .clamp(0, MAX_TOKEN_LIFETIME_SECS);

        let expires_at = ChronoDuration::try_seconds(lifetime)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ClientError::invalid_response(
                    "expires_in",
                    format!("token lifetime of {}s is out of range", lifetime),
                )
            })?;

        Ok(Self {
            access_token: response.access_token,
            token_type: response.token_type,
            refresh_token: response.refresh_token,
            expires_at,
        })
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + ChronoDuration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Acquires and caches access tokens for one set of credentials
pub struct TokenProvider {
    http: Client,
    descriptor: AuthDescriptor,
    token_url: Url,
    cached: RwLock<Option<AccessToken>>,
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token_url", &self.token_url.as_str())
            .field("username", &self.descriptor.username)
            .field("client_id", &self.descriptor.client_id)
            .field("has_token", &self.cached.read().is_some())
            .finish()
    }
}

impl TokenProvider {
    pub fn new(http: Client, descriptor: AuthDescriptor, token_url: Url) -> ClientResult<Self> {
        descriptor.validate()?;
        Ok(Self {
            http,
            descriptor,
            token_url,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Run the password grant and cache the result
    pub async fn login(&self) -> ClientResult<AccessToken> {
        let _guard = self.refresh_lock.lock().await;
        let token = self.password_grant().await?;
        *self.cached.write() = Some(token.clone());
        Ok(token)
    }

    /// Current token, renewing it first if it is missing or about to expire
    pub async fn token(&self) -> ClientResult<AccessToken> {
        if let Some(token) = self.valid_cached() {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have renewed while we waited for the lock
        if let Some(token) = self.valid_cached() {
            return Ok(token);
        }

        let refresh_token = self
            .cached
            .read()
            .as_ref()
            .and_then(|t| t.refresh_token.clone());

        let token = match refresh_token {
            Some(refresh_token) => match self.refresh_grant(&refresh_token).await {
                Ok(token) => token,
                Err(e) => {
                    warn!(error = %e, "Token refresh failed, falling back to password grant");
                    self.password_grant().await?
                }
            },
            None => self.password_grant().await?,
        };

        *self.cached.write() = Some(token.clone());
        Ok(token)
    }

    /// `Authorization` header value for the next request
    pub async fn bearer(&self) -> ClientResult<String> {
        Ok(self.token().await?.header_value())
    }

    /// Drop the cached token so the next call re-authenticates
    pub fn invalidate(&self) {
        debug!("Invalidating cached access token");
        *self.cached.write() = None;
    }

    fn valid_cached(&self) -> Option<AccessToken> {
        self.cached
            .read()
            .as_ref()
            .filter(|token| !token.is_expired())
            .cloned()
    }

    async fn password_grant(&self) -> ClientResult<AccessToken> {
        let mut form = vec![
            ("grant_type", "password".to_string()),
            ("username", self.descriptor.username.clone()),
            ("password", self.descriptor.password.clone()),
            ("client_id", self.descriptor.client_id.clone()),
        ];
        if let Some(scope) = self.descriptor.scope_param() {
            form.push(("scope", scope));
        }

        debug!(
            token_url = %self.token_url,
            username = %self.descriptor.username,
            client_id = %self.descriptor.client_id,
            "Requesting access token with password grant"
        );

        let token = self.request_token(&form).await?;
        info!(
            username = %self.descriptor.username,
            expires_at = %token.expires_at,
            "Authenticated against identity provider"
        );
        Ok(token)
    }

    async fn refresh_grant(&self, refresh_token: &str) -> ClientResult<AccessToken> {
        let form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
            ("client_id", self.descriptor.client_id.clone()),
        ];

        debug!(token_url = %self.token_url, "Refreshing access token");
        self.request_token(&form).await
    }

    async fn request_token(&self, form: &[(&str, String)]) -> ClientResult<AccessToken> {
        let issued_at = Utc::now();
        let response = self
            .http
            .post(self.token_url.clone())
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<TokenResponse>().await.map_err(|e| {
                ClientError::invalid_response("access_token", format!("{}", e))
            })?;
            return AccessToken::from_response(body, issued_at);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
            Ok(err) => match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            },
            Err(_) => text,
        };

        warn!(status = %status, error = %message, "Token endpoint rejected request");
        Err(ClientError::auth_error(format!("HTTP {}: {}", status, message)))
    }
}
