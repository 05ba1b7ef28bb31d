//! Environment command handlers

use platform_client::models::Environment;
use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection, print_json};
use crate::{EnvironmentCommands, OutputFormat};

fn environment_line(env: &Environment) -> String {
    format!(
        "{} {} ({}) authorization={}",
        env.uid,
        env.name,
        or_dash(Some(env.short_name.as_str())),
        or_dash(env.authorization_issuer.as_deref()),
    )
}

pub async fn handle_environment_command(
    cmd: EnvironmentCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        EnvironmentCommands::List => {
            let envs = client.get_environments().await.inspect_err(|e| {
                eprintln!("✗ Failed to list environments: {}", e);
            })?;
            print_collection(envs, format, "environments", environment_line)?;
        }
        EnvironmentCommands::Get { uid } => {
            let env = client.get_environment(uid).await.inspect_err(|e| {
                eprintln!("✗ Failed to get environment: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&env)?,
                OutputFormat::Table => {
                    println!("✓ Environment Details:\n");
                    println!("  UID: {}", env.uid);
                    println!("  Name: {}", env.name);
                    println!("  Short name: {}", or_dash(Some(env.short_name.as_str())));
                    println!("  Visibility: {}", or_dash(Some(env.visibility.as_str())));
                    println!(
                        "  Authorization issuer: {}",
                        or_dash(env.authorization_issuer.as_deref())
                    );
                    if env.auto_approves() {
                        println!("  Grants are approved automatically");
                    }
                }
            }
        }
    }
    Ok(())
}
