use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use super::{RefOption, ReferenceFetcher, ReferenceKind};
use crate::io::{DocumentFormat, parse_document_str};

/// Serves reference collections from an in-memory document such as
/// `{"crops": ["BEAN", "KALE"], "equipment": [{"id": 3, "name": "Tractor"}]}`.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    collections: HashMap<String, Vec<RefOption>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, kind: ReferenceKind, options: Vec<RefOption>) -> Self {
        self.collections.insert(kind.key().to_string(), options);
        self
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(anyhow!("reference fixture must be an object of collections"));
        };
        let mut collections = HashMap::new();
        for (key, items) in map {
            let options: Vec<RefOption> = serde_json::from_value(items.clone())
                .with_context(|| format!("invalid options for reference collection '{key}'"))?;
            let kind = ReferenceKind::from_key(key);
            collections.insert(kind.key().to_string(), options);
        }
        Ok(Self { collections })
    }

    pub fn from_document(contents: &str, format: DocumentFormat) -> Result<Self> {
        let value = parse_document_str(contents, format)?;
        Self::from_value(&value)
    }
}

impl ReferenceFetcher for FixtureFetcher {
    fn fetch(&self, kind: &ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> {
        let outcome = self
            .collections
            .get(kind.key())
            .cloned()
            .ok_or_else(|| anyhow!("no fixture for reference collection '{kind}'"));
        future::ready(outcome).boxed()
    }
}
