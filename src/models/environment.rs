//! Environments (dev, staging, production and private environments).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

/// Environment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub uid: Uuid,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: String,
    /// Who approves grants in this environment: Stream owner or Auto
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_issuer: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

impl Environment {
    /// Grants in auto-approving environments never sit in `PENDING`
    #[must_use]
    pub fn auto_approves(&self) -> bool {
        self.authorization_issuer
            .as_deref()
            .is_some_and(|issuer| issuer.eq_ignore_ascii_case("auto"))
    }
}
