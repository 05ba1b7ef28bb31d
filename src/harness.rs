//! # Grant Lookup Harness
//!
//! The manual check this crate exists for: build a [`GrantQuery`], run it once
//! against the platform and report what came back.

use tracing::{info, warn};

use crate::error::ClientResult;
use crate::models::{AccessGrant, GrantQuery};
use crate::transport::PlatformClient;

/// Result of a single grant lookup
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// The platform returned no matching grants
    Empty,
    /// Matching grants, in the order the platform returned them
    Found(Vec<AccessGrant>),
}

impl LookupOutcome {
    #[must_use]
    pub fn grants(&self) -> &[AccessGrant] {
        match self {
            Self::Empty => &[],
            Self::Found(grants) => grants,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Run one access-grant lookup and log the outcome
///
/// A failed call is returned as is; nothing is logged about records in that case.
pub async fn run_grant_lookup(
    client: &dyn PlatformClient,
    query: GrantQuery,
) -> ClientResult<LookupOutcome> {
    info!(
        endpoint = client.endpoint(),
        application = ?query.application_id,
        environment = ?query.environment_id,
        topic = ?query.topic_id,
        status = ?query.status,
        "Looking up access grants"
    );

    let grants = client.get_access_grants(&query).await?.into_items();

    if grants.is_empty() {
        warn!("No access grants found");
        return Ok(LookupOutcome::Empty);
    }

    for grant in &grants {
        info!(
            uid = %grant.uid,
            status = %grant.status,
            application = grant.application.as_ref().map(|a| a.name.as_str()),
            environment = grant.environment.as_ref().map(|e| e.name.as_str()),
            topic = grant.topic.as_ref().map(|t| t.name.as_str()),
            "Access grant"
        );
    }
    info!(count = grants.len(), "Access grant lookup complete");

    Ok(LookupOutcome::Found(grants))
}
