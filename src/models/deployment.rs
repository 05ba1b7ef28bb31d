//! Application deployments: a running instance of an application or connector
//! in one environment.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

use super::ResourceRef;

/// Application deployment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDeployment {
    pub uid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<ResourceRef>,
    /// Running, Stopped, Failed, …
    #[serde(default)]
    pub deployment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,
    #[serde(default)]
    pub configs: HashMap<String, String>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

impl ApplicationDeployment {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deployment_status.eq_ignore_ascii_case("running")
    }
}
