//! Configuration command handlers

use std::path::PathBuf;

use platform_client::{ClientConfig, ClientError, ClientResult};

use crate::ConfigCommands;

pub async fn handle_config_command(cmd: ConfigCommands, config: &ClientConfig) -> ClientResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let redacted = config.redacted();
            println!("Platform CLI Configuration:");
            println!("  API:");
            println!("    Base URL: {}", redacted.api.base_url);
            println!("    Realm: {}", redacted.api.realm);
            println!("    Timeout: {}ms", redacted.api.timeout_ms);
            println!("    Max retries: {}", redacted.api.max_retries);
            println!("  Auth:");
            println!("    Username: {}", redacted.auth.username);
            println!("    Password: {}", redacted.auth.password);
            println!("    Client id: {}", redacted.auth.client_id);
            println!(
                "    Token URL: {}",
                if redacted.auth.token_url.is_empty() {
                    "(derived from realm)"
                } else {
                    redacted.auth.token_url.as_str()
                }
            );
            println!("    Scopes: {}", redacted.auth.scopes.join(" "));
            println!("  CLI:");
            println!("    Default format: {}", redacted.cli.default_format);
            println!("    Verbose level: {}", redacted.cli.verbose_level);
        }
        ConfigCommands::Init { output, force } => {
            let path = match output {
                Some(path) => PathBuf::from(path),
                None => ClientConfig::default_config_path()?,
            };

            if path.exists() && !force {
                eprintln!("✗ {} already exists (use --force to overwrite)", path.display());
                return Err(ClientError::InvalidInput(format!(
                    "Config file already exists: {}",
                    path.display()
                )));
            }

            // Credentials stay out of the file; supply them via PLATFORM_PASSWORD
            let mut to_write = config.clone();
            to_write.auth.password.clear();
            to_write.save_to_file(&path)?;
            println!("✓ Wrote configuration to {}", path.display());
            println!("  Set PLATFORM_PASSWORD to provide the password");
        }
    }
    Ok(())
}
