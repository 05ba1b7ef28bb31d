//! Health check command handler

use platform_client::{ClientConfig, ClientResult, PlatformApiClient, PlatformApiConfig};

pub async fn handle_health_command(config: &ClientConfig) -> ClientResult<()> {
    println!("Checking platform API health...");

    // The actuator endpoint is public, so skip the token round trip
    let client = PlatformApiClient::new(PlatformApiConfig::from(config))?;

    match client.health_check().await {
        Ok(()) => {
            println!("  ✓ Platform API at {} is healthy", client.base_url());
            Ok(())
        }
        Err(e) => {
            println!("  ✗ Platform API health check failed: {}", e);
            Err(e)
        }
    }
}
