//! # Platform Models
//!
//! Request and response types exchanged with the self-service management API.
//! Records carry the fields the client works with; anything else the server
//! sends is kept in an `extra` map so it survives a read/write round trip.

pub mod access_grant;
pub mod application;
pub mod collection;
pub mod deployment;
pub mod environment;
pub mod principal;
pub mod schema;
pub mod topic;

pub use access_grant::{AccessGrant, GrantQuery, GrantStatus};
pub use application::{Application, ApplicationRequest, GroupRef};
pub use collection::{Collection, PageInfo};
pub use deployment::ApplicationDeployment;
pub use environment::Environment;
pub use principal::ApplicationPrincipal;
pub use schema::{SchemaRef, SchemaVersion};
pub use topic::{Topic, TopicRequest};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compact reference to another platform record, as embedded in grants and deployments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub uid: Uuid,
    #[serde(default)]
    pub name: String,
}
