use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One selectable reference item. Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawOption")]
pub struct RefOption {
    pub id: String,
    pub label: String,
}

impl RefOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its identifier.
    pub fn plain(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }
}

impl PartialEq for RefOption {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RefOption {}

impl Hash for RefOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Reference endpoints hand back either bare strings or records keyed by
// id/value with a name/title/label.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Record {
        #[serde(alias = "value")]
        id: Value,
        #[serde(default, alias = "name", alias = "title")]
        label: Option<String>,
    },
}

impl TryFrom<RawOption> for RefOption {
    type Error = String;

    fn try_from(raw: RawOption) -> Result<Self, Self::Error> {
        match raw {
            RawOption::Plain(id) => Ok(RefOption::plain(id)),
            RawOption::Record { id, label } => {
                let id = match id {
                    Value::String(text) => text,
                    Value::Number(num) => num.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    other => return Err(format!("option id must be a scalar, got {other}")),
                };
                if id.is_empty() {
                    return Err("option id must not be empty".to_string());
                }
                let label = label.unwrap_or_else(|| id.clone());
                Ok(RefOption { id, label })
            }
        }
    }
}

pub(crate) fn contains(options: &[RefOption], id: &str) -> bool {
    options.iter().any(|option| option.id == id)
}

pub(crate) fn position(options: &[RefOption], id: &str) -> Option<usize> {
    options.iter().position(|option| option.id == id)
}
