//! Application principal command handlers

use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection};
use crate::{OutputFormat, PrincipalCommands};

pub async fn handle_principal_command(
    cmd: PrincipalCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        PrincipalCommands::List { application_id } => {
            let principals = client
                .get_application_principals(application_id)
                .await
                .inspect_err(|e| {
                    eprintln!("✗ Failed to list application principals: {}", e);
                })?;

            print_collection(principals, format, "principals", |p| {
                format!(
                    "{} {} environment={}{}",
                    p.uid,
                    p.principal,
                    or_dash(p.environment.as_ref().map(|e| e.name.as_str())),
                    if p.custom { " (custom)" } else { "" },
                )
            })?;
        }
    }
    Ok(())
}
