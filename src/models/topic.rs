//! Topics (streams) and their creation payload.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

use super::GroupRef;

/// Topic record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub uid: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub key_type: String,
    #[serde(default)]
    pub value_type: String,
    #[serde(default)]
    pub retention_policy: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<GroupRef>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

/// Body for `POST /topics`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRequest {
    pub name: String,
    /// String, JSON, AVRO, Binary
    pub key_type: String,
    pub value_type: String,
    /// Group UID
    pub owners: Uuid,
    /// compact, delete
    pub retention_policy: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TopicRequest {
    /// Reject names the platform refuses before sending anything
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("topic name must not be empty".to_string());
        }
        if let Some(bad) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(format!("topic name contains invalid character '{}'", bad));
        }
        Ok(())
    }
}
