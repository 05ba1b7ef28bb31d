//! Applications registered on the platform.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

/// Owning group of an application or topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub uid: Uuid,
    pub name: String,
}

/// Application record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub uid: Uuid,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    /// Kafka client id the application connects with
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub application_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<GroupRef>,
    #[serde(default)]
    pub visibility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

/// Body for `POST /applications`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub name: String,
    pub short_name: String,
    pub application_id: String,
    /// Custom, Connector
    pub application_type: String,
    /// Group UID
    pub owners: Uuid,
    /// Public, Private
    pub visibility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
