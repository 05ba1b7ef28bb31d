//! Application deployment command handlers

use platform_client::models::ApplicationDeployment;
use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection, print_json};
use crate::{DeploymentCommands, OutputFormat};

fn deployment_line(deployment: &ApplicationDeployment) -> String {
    format!(
        "{} application={} environment={} status={}",
        deployment.uid,
        or_dash(deployment.application.as_ref().map(|a| a.name.as_str())),
        or_dash(deployment.environment.as_ref().map(|e| e.name.as_str())),
        or_dash(Some(deployment.deployment_status.as_str())),
    )
}

pub async fn handle_deployment_command(
    cmd: DeploymentCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        DeploymentCommands::List => {
            let deployments = client.get_application_deployments().await.inspect_err(|e| {
                eprintln!("✗ Failed to list application deployments: {}", e);
            })?;
            print_collection(deployments, format, "application deployments", deployment_line)?;
        }
        DeploymentCommands::Find {
            application_id,
            environment_id,
        } => {
            let found = client
                .find_application_deployment(application_id, environment_id)
                .await
                .inspect_err(|e| {
                    eprintln!("✗ Failed to find application deployment: {}", e);
                })?;

            match (found, format) {
                (None, OutputFormat::Json) => println!("null"),
                (None, OutputFormat::Table) => {
                    println!(
                        "Application {} is not deployed in environment {}",
                        application_id, environment_id
                    );
                }
                (Some(deployment), OutputFormat::Json) => print_json(&deployment)?,
                (Some(deployment), OutputFormat::Table) => {
                    println!("✓ Application Deployment:\n");
                    println!("  {}", deployment_line(&deployment));
                    if let Some(ref deployment_type) = deployment.deployment_type {
                        println!("  Type: {}", deployment_type);
                    }
                    let mut configs: Vec<_> = deployment.configs.iter().collect();
                    configs.sort();
                    for (key, value) in configs {
                        println!("    {} = {}", key, value);
                    }
                }
            }
        }
    }
    Ok(())
}
