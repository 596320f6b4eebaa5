use indexmap::IndexMap;

use crate::signal::ValidityLatch;
use crate::widgets::FormWidget;

/// Folds per-field validity into the single flag that gates submission.
///
/// Fields are tracked by name in registration order. Every setter returns
/// `Some(valid)` only when the form-level flag changes.
#[derive(Debug, Clone, Default)]
pub struct FormValidity {
    fields: IndexMap<String, bool>,
    latch: ValidityLatch,
}

impl FormValidity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, valid: bool) -> Option<bool> {
        self.fields.insert(field.into(), valid);
        self.publish()
    }

    /// Record the current validity of `widget` under `field`.
    pub fn observe<W: FormWidget + ?Sized>(&mut self, field: &str, widget: &W) -> Option<bool> {
        self.set(field, widget.is_valid())
    }

    pub fn remove(&mut self, field: &str) -> Option<bool> {
        self.fields.shift_remove(field);
        self.publish()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|valid| *valid)
    }

    pub fn field(&self, field: &str) -> Option<bool> {
        self.fields.get(field).copied()
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn publish(&mut self) -> Option<bool> {
        let valid = self.is_valid();
        self.latch.observe(valid)
    }
}
