//! Registered schema versions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use uuid::Uuid;

/// Schema a version belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    pub uid: Uuid,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

impl SchemaRef {
    /// `namespace.name`, or just the name for schemas without a namespace
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Schema version record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaVersion {
    pub uid: Uuid,
    pub version: String,
    pub schema: SchemaRef,
    /// Raw schema document (Avro JSON)
    #[serde(default)]
    pub schema_body: String,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}
