use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::PicklistError;

/// One external record of a picklist, addressed by its key column.
#[derive(Debug, Clone, PartialEq)]
pub struct PicklistRow {
    key: String,
    fields: Map<String, Value>,
}

impl PicklistRow {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Non-negative integer reading of `column`; anything unreadable is 0.
    pub fn quantity(&self, column: &str) -> u64 {
        match self.fields.get(column) {
            Some(Value::Number(num)) => num
                .as_u64()
                .or_else(|| num.as_f64().map(|value| value.max(0.0).floor() as u64))
                .unwrap_or(0),
            Some(Value::String(text)) => text.trim().parse::<u64>().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Turn raw records into keyed rows. Duplicate or missing keys reject the
/// whole batch.
pub(crate) fn build_rows(
    records: Vec<Map<String, Value>>,
    key_column: &str,
) -> Result<Vec<PicklistRow>, PicklistError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut rows = Vec::with_capacity(records.len());
    for (position, fields) in records.into_iter().enumerate() {
        let key = match fields.get(key_column) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(Value::Number(num)) => num.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => {
                return Err(PicklistError::MissingRowKey {
                    column: key_column.to_string(),
                    position,
                });
            }
        };
        if !seen.insert(key.clone()) {
            return Err(PicklistError::DuplicateRowKey { key });
        }
        rows.push(PicklistRow { key, fields });
    }
    Ok(rows)
}
