//! Access grants: the record that lets an application use a topic in an environment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ResourceRef;
use crate::error::ClientError;

/// Lifecycle state of an access grant
///
/// - `Pending` → `Approved` | `Rejected` | `Cancelled`
/// - `Approved` → `Revoked`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantStatus {
    /// Requested, waiting for the topic owner
    Pending,
    /// Approved by the topic owner
    Approved,
    /// Denied by the topic owner
    Rejected,
    /// Previously approved, since withdrawn
    Revoked,
    /// Withdrawn by the requester before a decision
    Cancelled,
}

impl GrantStatus {
    pub const ALL: [GrantStatus; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Revoked,
        Self::Cancelled,
    ];

    /// Wire representation used in query strings and payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Revoked => "REVOKED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether the grant currently allows access
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ClientError::InvalidInput(format!(
                    "Invalid grant status '{}'. Valid: pending, approved, rejected, revoked, cancelled",
                    s
                ))
            })
    }
}

/// Access grant record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub uid: Uuid,
    pub status: GrantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

/// Filter for `GET /access_grants/search/findByAttributes`
///
/// Every field is optional; unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantQuery {
    pub application_id: Option<Uuid>,
    pub environment_id: Option<Uuid>,
    pub topic_id: Option<Uuid>,
    pub status: Option<GrantStatus>,
}

impl GrantQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn application(mut self, id: Uuid) -> Self {
        self.application_id = Some(id);
        self
    }

    #[must_use]
    pub fn environment(mut self, id: Uuid) -> Self {
        self.environment_id = Some(id);
        self
    }

    #[must_use]
    pub fn topic(mut self, id: Uuid) -> Self {
        self.topic_id = Some(id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: GrantStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query-string pairs in the order the API documents them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(id) = self.application_id {
            pairs.push(("application", id.to_string()));
        }
        if let Some(id) = self.environment_id {
            pairs.push(("environment", id.to_string()));
        }
        if let Some(id) = self.topic_id {
            pairs.push(("topic", id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.application_id.is_none()
            && self.environment_id.is_none()
            && self.topic_id.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("approved".parse::<GrantStatus>().unwrap(), GrantStatus::Approved);
        assert_eq!(" Revoked ".parse::<GrantStatus>().unwrap(), GrantStatus::Revoked);
        assert_eq!("PENDING".parse::<GrantStatus>().unwrap(), GrantStatus::Pending);
        assert!("granted".parse::<GrantStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(GrantStatus::Cancelled).unwrap(),
            json!("CANCELLED")
        );
        assert!(GrantStatus::Approved.is_active());
        assert!(!GrantStatus::Pending.is_active());
    }

    #[test]
    fn test_access_grant_deserialization() {
        let grant: AccessGrant = serde_json::from_value(json!({
            "uid": "7d0f7b62-3b1e-4c43-a0c4-3c2f0b7b0f11",
            "status": "APPROVED",
            "application": {"uid": "0a6b4fc6-6c3f-4f0e-9f4b-1fb0c0e1f7a2", "name": "billing"},
            "environment": {"uid": "5d7a5e0c-5b9d-4a55-8a5d-a0f5b3c9c1d3", "name": "dev"},
            "topic": {"uid": "c1f1f1de-8a8e-4b7b-9e67-1e9f0d6c7a44", "name": "invoices"},
            "requestedAt": "2024-01-15T09:30:00Z",
            "_links": {"self": {"href": "https://platform.local/api/access_grants/7d0f"}}
        }))
        .unwrap();

        assert_eq!(grant.status, GrantStatus::Approved);
        assert_eq!(grant.application.as_ref().unwrap().name, "billing");
        assert_eq!(grant.topic.as_ref().unwrap().name, "invoices");
        assert!(grant.requested_at.is_some());
        assert!(grant.approved_at.is_none());
        assert!(grant.extra.contains_key("_links"));
    }

    #[test]
    fn test_empty_query_has_no_pairs() {
        let query = GrantQuery::new();
        assert!(query.is_empty());
        assert!(query.query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_order() {
        let app = Uuid::new_v4();
        let topic = Uuid::new_v4();
        let query = GrantQuery::new()
            .topic(topic)
            .status(GrantStatus::Approved)
            .application(app);

        assert_eq!(
            query.query_pairs(),
            vec![
                ("application", app.to_string()),
                ("topic", topic.to_string()),
                ("status", "APPROVED".to_string()),
            ]
        );
    }

    fn optional_uuid() -> impl Strategy<Value = Option<Uuid>> {
        proptest::option::of(any::<u128>().prop_map(Uuid::from_u128))
    }

    proptest! {
        #[test]
        fn prop_only_set_fields_are_sent(
            application_id in optional_uuid(),
            environment_id in optional_uuid(),
            topic_id in optional_uuid(),
            status in proptest::option::of(proptest::sample::select(GrantStatus::ALL.to_vec())),
        ) {
            let query = GrantQuery { application_id, environment_id, topic_id, status };
            let pairs = query.query_pairs();
            let expected = [
                application_id.is_some(),
                environment_id.is_some(),
                topic_id.is_some(),
                status.is_some(),
            ]
            .iter()
            .filter(|set| **set)
            .count();

            prop_assert_eq!(pairs.len(), expected);
            prop_assert_eq!(query.is_empty(), expected == 0);
            for (key, value) in &pairs {
                prop_assert!(!value.is_empty());
                match *key {
                    "application" => prop_assert_eq!(Some(value.clone()), application_id.map(|u| u.to_string())),
                    "environment" => prop_assert_eq!(Some(value.clone()), environment_id.map(|u| u.to_string())),
                    "topic" => prop_assert_eq!(Some(value.clone()), topic_id.map(|u| u.to_string())),
                    "status" => prop_assert_eq!(value.parse::<GrantStatus>().ok(), status),
                    other => prop_assert!(false, "unexpected key {}", other),
                }
            }
        }
    }
}
