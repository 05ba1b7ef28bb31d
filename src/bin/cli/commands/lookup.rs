//! The access-grant lookup check

use platform_client::{run_grant_lookup, ClientConfig, ClientResult, GrantQuery, LookupOutcome};

use super::grants::print_grant_line;
use crate::cli::connect;
use crate::cli::output::print_json;
use crate::{GrantFilterArgs, OutputFormat};

impl From<GrantFilterArgs> for GrantQuery {
    fn from(args: GrantFilterArgs) -> Self {
        GrantQuery {
            application_id: args.application_id,
            environment_id: args.environment_id,
            topic_id: args.topic_id,
            status: args.status,
        }
    }
}

pub async fn handle_lookup_command(
    filter: GrantFilterArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    let client = connect(config).await?;

    match run_grant_lookup(&client, filter.into()).await? {
        LookupOutcome::Empty => {
            if format == OutputFormat::Json {
                print_json(&Vec::<()>::new())?;
            } else {
                println!("No access grants found");
            }
        }
        LookupOutcome::Found(grants) => match format {
            OutputFormat::Json => print_json(&grants)?,
            OutputFormat::Table => {
                println!("✓ Found {} access grants\n", grants.len());
                for grant in &grants {
                    println!("  • {}", print_grant_line(grant));
                }
            }
        },
    }
    Ok(())
}
