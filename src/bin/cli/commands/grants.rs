//! Access grant command handlers

use platform_client::{AccessGrant, ClientConfig, ClientResult, GrantQuery};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection, print_json};
use crate::{GrantCommands, OutputFormat};

pub(crate) fn print_grant_line(grant: &AccessGrant) -> String {
    format!(
        "{} [{}] application={} environment={} topic={}",
        grant.uid,
        grant.status,
        or_dash(grant.application.as_ref().map(|a| a.name.as_str())),
        or_dash(grant.environment.as_ref().map(|e| e.name.as_str())),
        or_dash(grant.topic.as_ref().map(|t| t.name.as_str())),
    )
}

pub async fn handle_grant_command(
    cmd: GrantCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        GrantCommands::List(filter) => {
            let query = GrantQuery::from(filter);
            match client.get_access_grants(&query).await {
                Ok(grants) => print_collection(grants, format, "access grants", print_grant_line)?,
                Err(e) => {
                    eprintln!("✗ Failed to list access grants: {}", e);
                    return Err(e);
                }
            }
        }
        GrantCommands::Get { uid } => match client.get_access_grant(uid).await {
            Ok(grant) => match format {
                OutputFormat::Json => print_json(&grant)?,
                OutputFormat::Table => {
                    println!("✓ Access Grant Details:\n");
                    println!("  UID: {}", grant.uid);
                    println!("  Status: {}", grant.status);
                    if let Some(ref app) = grant.application {
                        println!("  Application: {} ({})", app.name, app.uid);
                    }
                    if let Some(ref env) = grant.environment {
                        println!("  Environment: {} ({})", env.name, env.uid);
                    }
                    if let Some(ref topic) = grant.topic {
                        println!("  Topic: {} ({})", topic.name, topic.uid);
                    }
                    if let Some(requested_at) = grant.requested_at {
                        println!("  Requested at: {}", requested_at);
                    }
                    if let Some(approved_at) = grant.approved_at {
                        println!("  Approved at: {}", approved_at);
                    }
                }
            },
            Err(e) => {
                eprintln!("✗ Failed to get access grant: {}", e);
                return Err(e);
            }
        },
    }
    Ok(())
}
