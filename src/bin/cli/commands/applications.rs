//! Application command handlers

use platform_client::models::{Application, ApplicationRequest};
use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection, print_json};
use crate::{ApplicationCommands, OutputFormat};

fn application_line(app: &Application) -> String {
    format!(
        "{} {} ({}) type={} owners={}",
        app.uid,
        app.name,
        or_dash(Some(app.short_name.as_str())),
        or_dash(Some(app.application_type.as_str())),
        or_dash(app.owners.as_ref().map(|g| g.name.as_str())),
    )
}

pub async fn handle_application_command(
    cmd: ApplicationCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        ApplicationCommands::List => {
            let apps = client.get_applications().await.inspect_err(|e| {
                eprintln!("✗ Failed to list applications: {}", e);
            })?;
            print_collection(apps, format, "applications", application_line)?;
        }
        ApplicationCommands::Get { uid } => {
            let app = client.get_application(uid).await.inspect_err(|e| {
                eprintln!("✗ Failed to get application: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&app)?,
                OutputFormat::Table => {
                    println!("✓ Application Details:\n");
                    println!("  UID: {}", app.uid);
                    println!("  Name: {}", app.name);
                    println!("  Short name: {}", or_dash(Some(app.short_name.as_str())));
                    println!("  Client id: {}", or_dash(Some(app.application_id.as_str())));
                    println!("  Type: {}", or_dash(Some(app.application_type.as_str())));
                    println!("  Visibility: {}", or_dash(Some(app.visibility.as_str())));
                    if let Some(ref owners) = app.owners {
                        println!("  Owners: {} ({})", owners.name, owners.uid);
                    }
                    if let Some(ref description) = app.description {
                        println!("  Description: {}", description);
                    }
                }
            }
        }
        ApplicationCommands::Find { name } => {
            let apps = client.find_application_by_name(&name).await.inspect_err(|e| {
                eprintln!("✗ Failed to find application '{}': {}", name, e);
            })?;
            print_collection(apps, format, "applications", application_line)?;
        }
        ApplicationCommands::Create {
            name,
            short_name,
            application_id,
            application_type,
            owners,
            visibility,
            description,
        } => {
            println!("Creating application: {}", name);
            let request = ApplicationRequest {
                name,
                short_name,
                application_id,
                application_type,
                owners,
                visibility,
                description,
            };

            let app = client.create_application(&request).await.inspect_err(|e| {
                eprintln!("✗ Failed to create application: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&app)?,
                OutputFormat::Table => {
                    println!("✓ Application created successfully!");
                    println!("  UID: {}", app.uid);
                }
            }
        }
        ApplicationCommands::Delete { uid } => {
            client.delete_application(uid).await.inspect_err(|e| {
                eprintln!("✗ Failed to delete application: {}", e);
            })?;
            println!("✓ Application {} deleted", uid);
        }
    }
    Ok(())
}
