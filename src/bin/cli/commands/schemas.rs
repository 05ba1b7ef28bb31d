//! Schema version command handlers

use platform_client::{ClientConfig, ClientResult};

use crate::cli::connect;
use crate::cli::output::{print_collection, print_json};
use crate::{OutputFormat, SchemaCommands};

pub async fn handle_schema_command(
    cmd: SchemaCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match cmd {
        SchemaCommands::List => {
            let versions = client.get_schema_versions().await.inspect_err(|e| {
                eprintln!("✗ Failed to list schema versions: {}", e);
            })?;
            print_collection(versions, format, "schema versions", |v| {
                format!("{} {} v{}", v.uid, v.schema.full_name(), v.version)
            })?;
        }
        SchemaCommands::Get { uid, body } => {
            let version = client.get_schema_version(uid).await.inspect_err(|e| {
                eprintln!("✗ Failed to get schema version: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&version)?,
                OutputFormat::Table => {
                    println!("✓ Schema Version:\n");
                    println!("  UID: {}", version.uid);
                    println!("  Schema: {}", version.schema.full_name());
                    println!("  Version: {}", version.version);
                    if body {
                        // Avro documents are JSON; fall back to the raw text otherwise
                        match serde_json::from_str::<serde_json::Value>(&version.schema_body) {
                            Ok(doc) => print_json(&doc)?,
                            Err(_) => println!("{}", version.schema_body),
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
