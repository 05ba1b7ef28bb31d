//! Command handlers for the platform CLI
//!
//! One module per command category.

pub mod applications;
pub mod auth;
pub mod config;
pub mod deployments;
pub mod environments;
pub mod grants;
pub mod health;
pub mod lookup;
pub mod principals;
pub mod schemas;
pub mod topics;

pub use applications::handle_application_command;
pub use auth::handle_auth_command;
pub use config::handle_config_command;
pub use deployments::handle_deployment_command;
pub use environments::handle_environment_command;
pub use grants::handle_grant_command;
pub use health::handle_health_command;
pub use lookup::handle_lookup_command;
pub use principals::handle_principal_command;
pub use schemas::handle_schema_command;
pub use topics::handle_topic_command;
