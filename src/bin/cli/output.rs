//! Output helpers shared by the command handlers

use platform_client::{ClientError, ClientResult, Collection};
use serde::Serialize;

use crate::OutputFormat;

/// Pretty-print any serializable value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ClientResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(ClientError::SerializationError)?;
    println!("{}", text);
    Ok(())
}

/// Print a collection either as JSON or one line per record
pub fn print_collection<T, F>(
    collection: Collection<T>,
    format: OutputFormat,
    noun: &str,
    line: F,
) -> ClientResult<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    let items = collection.into_items();
    match format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            println!("✓ Found {} {}\n", items.len(), noun);
            for item in &items {
                println!("  • {}", line(item));
            }
            Ok(())
        }
    }
}

/// `value` or a dash for missing optional fields
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
