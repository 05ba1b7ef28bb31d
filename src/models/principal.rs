//! Principals an application authenticates to Kafka with.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

use super::ResourceRef;

/// Application principal record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPrincipal {
    pub uid: Uuid,
    /// Certificate subject or OAuth client id
    pub principal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<ResourceRef>,
    /// True when the principal is not a certificate subject
    #[serde(default)]
    pub custom: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_principal_defaults() {
        let principal: ApplicationPrincipal = serde_json::from_value(json!({
            "uid": "a3d4c1b2-0f9e-4d8c-b7a6-5e4f3d2c1b0a",
            "principal": "CN=billing,OU=payments,O=Example"
        }))
        .unwrap();

        assert!(!principal.custom);
        assert!(principal.application.is_none());
        assert!(principal.principal.starts_with("CN="));
    }
}
