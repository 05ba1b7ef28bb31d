//! Wrapped collection responses.
//!
//! List endpoints return HAL-style bodies:
//!
//! ```json
//! {
//!   "_embedded": { "access_grants": [ { "uid": "…" } ] },
//!   "page": { "size": 20, "totalElements": 1, "totalPages": 1, "number": 0 }
//! }
//! ```
//!
//! The key under `_embedded` differs per resource, so it is kept as a map and
//! flattened by [`Collection::items`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A list response from the platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(rename = "_embedded", default = "BTreeMap::new")]
    pub embedded: BTreeMap<String, Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

/// Paging metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            embedded: BTreeMap::new(),
            page: None,
        }
    }
}

impl<T> Collection<T> {
    /// Iterate every record across all embedded lists
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.embedded.values().flatten()
    }

    /// Consume the wrapper and return the records
    pub fn into_items(self) -> Vec<T> {
        self.embedded.into_values().flatten().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.embedded.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
