//! CLI module for the platform CLI tool
//!
//! Command handlers plus the client construction and output helpers they share.

pub mod commands;
pub mod output;

pub use commands::{
    handle_application_command, handle_auth_command, handle_config_command,
    handle_deployment_command, handle_environment_command, handle_grant_command,
    handle_health_command, handle_lookup_command, handle_principal_command,
    handle_schema_command, handle_topic_command,
};

use platform_client::{ClientConfig, ClientResult, PlatformApiClient, PlatformApiConfig};
use tracing::error;

/// Build an authenticated client from the loaded configuration
///
/// Fails when the configuration is invalid or the identity provider rejects
/// the credentials; callers exit non-zero in that case.
pub async fn connect(config: &ClientConfig) -> ClientResult<PlatformApiClient> {
    PlatformApiClient::connect(PlatformApiConfig::from(config))
        .await
        .inspect_err(|e| {
            error!(error = %e, base_url = %config.api.base_url, "Failed to create platform client");
            eprintln!("✗ Could not connect to {}: {}", config.api.base_url, e);
        })
}
