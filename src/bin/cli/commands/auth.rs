//! Authentication command handlers

use chrono::Utc;
use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::AuthCommands;

pub async fn handle_auth_command(cmd: AuthCommands, config: &ClientConfig) -> ClientResult<()> {
    match cmd {
        AuthCommands::Token { show } => {
            println!(
                "Authenticating {} against realm '{}'...",
                config.auth.username, config.api.realm
            );

            let client = connect(config).await?;
            let token = client.access_token().await?;
            let remaining = token.expires_at - Utc::now();

            println!("✓ Authenticated");
            println!("  Token type: {}", token.token_type);
            println!(
                "  Expires at: {} ({}s from now)",
                token.expires_at,
                remaining.num_seconds()
            );
            println!(
                "  Refresh token: {}",
                if token.refresh_token.is_some() { "yes" } else { "no" }
            );
            if show {
                println!("\n{}", token.access_token);
            }
        }
    }
    Ok(())
}
