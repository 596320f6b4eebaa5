use indexmap::IndexMap;
use serde_json::Value;

use super::row::PicklistRow;

/// Picked state recorded against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picked {
    Flag(bool),
    Quantity(u64),
}

impl Picked {
    pub fn is_picked(&self) -> bool {
        match self {
            Picked::Flag(flag) => *flag,
            Picked::Quantity(amount) => *amount > 0,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            Picked::Flag(flag) => u64::from(*flag),
            Picked::Quantity(amount) => *amount,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Picked::Flag(flag) => Value::Bool(*flag),
            Picked::Quantity(amount) => Value::from(*amount),
        }
    }
}

/// Row key to picked state, in row order.
pub type PickedMap = IndexMap<String, Picked>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickMode {
    Checkbox,
    /// Numeric quantities. When `source` names a column, that column is both
    /// the per-row maximum and what "select all" fills in, so a row can never
    /// be picked beyond the quantity it offers. Without a source, quantities
    /// are unbounded above and "select all" is unavailable.
    Quantity { source: Option<String> },
}

impl PickMode {
    pub fn quantity_from(column: impl Into<String>) -> Self {
        PickMode::Quantity {
            source: Some(column.into()),
        }
    }

    pub fn unpicked(&self) -> Picked {
        match self {
            PickMode::Checkbox => Picked::Flag(false),
            PickMode::Quantity { .. } => Picked::Quantity(0),
        }
    }

    pub fn max_for(&self, row: &PicklistRow) -> u64 {
        match self {
            PickMode::Quantity {
                source: Some(column),
            } => row.quantity(column),
            _ => u64::MAX,
        }
    }

    pub fn clamp(&self, row: &PicklistRow, requested: i64) -> u64 {
        let requested = u64::try_from(requested).unwrap_or(0);
        requested.min(self.max_for(row))
    }

    /// Fit a state carried over from elsewhere to this mode and row.
    pub fn coerce(&self, row: &PicklistRow, state: Picked) -> Picked {
        match self {
            PickMode::Checkbox => Picked::Flag(state.is_picked()),
            PickMode::Quantity { .. } => {
                let max = self.max_for(row);
                let amount = match state {
                    Picked::Flag(true) => max,
                    Picked::Flag(false) => 0,
                    Picked::Quantity(amount) => amount,
                };
                Picked::Quantity(amount.min(max))
            }
        }
    }
}

/// Rebuild the picked map for a new row set.
///
/// Keys that persist keep their state (re-clamped to the row's current
/// maximum), new keys start unpicked, and keys that left are dropped. The
/// result follows the order of `rows`.
pub fn reconcile(previous: &PickedMap, rows: &[PicklistRow], mode: &PickMode) -> PickedMap {
    rows.iter()
        .map(|row| {
            let state = match previous.get(row.key()) {
                Some(state) => mode.coerce(row, *state),
                None => mode.unpicked(),
            };
            (row.key().to_string(), state)
        })
        .collect()
}
