use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Table>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Split an array of objects into picklist records.
///
/// A bare object is treated as a single record; TOML documents, which cannot
/// have a top-level array, may wrap the records in a `rows` table.
pub fn records_from_value(value: Value) -> Result<Vec<Map<String, Value>>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("rows") {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(anyhow!("'rows' must be an array, got {other}")),
            None => vec![Value::Object(map)],
        },
        other => return Err(anyhow!("expected an array of records, got {other}")),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(anyhow!("record {idx} is not an object: {other}")),
        })
        .collect()
}
