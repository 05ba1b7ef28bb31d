//! Topic command handlers

use std::collections::HashMap;

use platform_client::models::{Topic, TopicRequest};
use platform_client::{ClientConfig, ClientError, ClientResult};

use crate::cli::connect;
use crate::cli::output::{or_dash, print_collection, print_json};
use crate::{OutputFormat, TopicCommands};

fn topic_line(topic: &Topic) -> String {
    format!(
        "{} {} key={} value={} retention={}",
        topic.uid,
        topic.name,
        or_dash(Some(topic.key_type.as_str())),
        or_dash(Some(topic.value_type.as_str())),
        or_dash(Some(topic.retention_policy.as_str())),
    )
}

/// Parse repeated `key=value` arguments
fn parse_properties(raw: &[String]) -> ClientResult<HashMap<String, String>> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| {
                    ClientError::InvalidInput(format!(
                        "Invalid property '{}', expected KEY=VALUE",
                        entry
                    ))
                })
        })
        .collect()
}

pub async fn handle_topic_command(
    cmd: TopicCommands,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<()> {
    // Validate local input before authenticating
    let create_request = match &cmd {
        TopicCommands::Create {
            name,
            key_type,
            value_type,
            owners,
            retention_policy,
            properties,
            description,
        } => Some(TopicRequest {
            name: name.clone(),
            key_type: key_type.clone(),
            value_type: value_type.clone(),
            owners: *owners,
            retention_policy: retention_policy.clone(),
            properties: parse_properties(properties)?,
            description: description.clone(),
        }),
        _ => None,
    };

    let client = connect(config).await?;

    match cmd {
        TopicCommands::List => {
            let topics = client.get_topics().await.inspect_err(|e| {
                eprintln!("✗ Failed to list topics: {}", e);
            })?;
            print_collection(topics, format, "topics", topic_line)?;
        }
        TopicCommands::Get { uid } => {
            let topic = client.get_topic(uid).await.inspect_err(|e| {
                eprintln!("✗ Failed to get topic: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&topic)?,
                OutputFormat::Table => {
                    println!("✓ Topic Details:\n");
                    println!("  UID: {}", topic.uid);
                    println!("  Name: {}", topic.name);
                    println!("  Key type: {}", or_dash(Some(topic.key_type.as_str())));
                    println!("  Value type: {}", or_dash(Some(topic.value_type.as_str())));
                    println!("  Retention: {}", or_dash(Some(topic.retention_policy.as_str())));
                    if let Some(ref owners) = topic.owners {
                        println!("  Owners: {} ({})", owners.name, owners.uid);
                    }
                    let mut properties: Vec<_> = topic.properties.iter().collect();
                    properties.sort();
                    for (key, value) in properties {
                        println!("    {} = {}", key, value);
                    }
                }
            }
        }
        TopicCommands::Create { .. } => {
            let Some(request) = create_request else {
                return Ok(());
            };
            println!("Creating topic: {}", request.name);
            let topic = client.create_topic(&request).await.inspect_err(|e| {
                eprintln!("✗ Failed to create topic: {}", e);
            })?;
            match format {
                OutputFormat::Json => print_json(&topic)?,
                OutputFormat::Table => {
                    println!("✓ Topic created successfully!");
                    println!("  UID: {}", topic.uid);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties() {
        let parsed = parse_properties(&[
            "segment.ms=600000".to_string(),
            " cleanup.policy = compact ".to_string(),
        ])
        .unwrap();
        assert_eq!(parsed["segment.ms"], "600000");
        assert_eq!(parsed["cleanup.policy"], "compact");
    }

    #[test]
    fn test_parse_properties_rejects_missing_separator() {
        assert!(parse_properties(&["segment.ms".to_string()]).is_err());
        assert!(parse_properties(&["=value".to_string()]).is_err());
    }
}
