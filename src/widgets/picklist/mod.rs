mod reconcile;
mod row;
mod sort;

pub use reconcile::{PickMode, Picked, PickedMap, reconcile};
pub use row::PicklistRow;
pub use sort::{SortOrder, SortState, compare_values};

use serde_json::{Map, Value};

use super::helpers::publish_validity;
use super::{FormWidget, WidgetKind};
use crate::error::PicklistError;
use crate::signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};
use row::build_rows;
use sort::display_order;

pub type PicklistEvent = WidgetEvent<PickedMap>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicklistConfig {
    pub key_column: String,
    pub mode: PickMode,
    /// At least one row must be picked.
    pub required: bool,
}

impl PicklistConfig {
    pub fn checkbox(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            mode: PickMode::Checkbox,
            required: false,
        }
    }

    pub fn quantity(key_column: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            mode: PickMode::quantity_from(source),
            required: false,
        }
    }

    pub fn with_mode(mut self, mode: PickMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Table of rows with a picked state per row key.
///
/// State lives in a key-addressed map, so sorting or replacing the rows
/// never moves a pick onto a different record.
#[derive(Debug)]
pub struct Picklist {
    config: PicklistConfig,
    rows: Vec<PicklistRow>,
    picked: PickedMap,
    sort: SortState,
    order: Vec<usize>,
    validity: ValidityLatch,
    events: Emitter<PicklistEvent>,
}

impl Picklist {
    pub fn new(
        config: PicklistConfig,
        records: Vec<Map<String, Value>>,
        picked: PickedMap,
    ) -> Result<Self, PicklistError> {
        let rows = build_rows(records, &config.key_column)?;
        let picked = reconcile(&picked, &rows, &config.mode);
        let order = (0..rows.len()).collect();
        let mut picklist = Self {
            config,
            rows,
            picked,
            sort: SortState::default(),
            order,
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        picklist.events.emit(WidgetEvent::Ready);
        picklist.publish_validity();
        Ok(picklist)
    }

    pub fn config(&self) -> &PicklistConfig {
        &self.config
    }

    pub fn mode(&self) -> &PickMode {
        &self.config.mode
    }

    pub fn picked(&self) -> &PickedMap {
        &self.picked
    }

    pub fn state_of(&self, key: &str) -> Option<Picked> {
        self.picked.get(key).copied()
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn row(&self, key: &str) -> Option<&PicklistRow> {
        self.rows.iter().find(|row| row.key() == key)
    }

    /// Rows in display order.
    pub fn display_rows(&self) -> Vec<&PicklistRow> {
        self.order.iter().map(|&idx| &self.rows[idx]).collect()
    }

    pub fn display_keys(&self) -> Vec<&str> {
        self.order.iter().map(|&idx| self.rows[idx].key()).collect()
    }

    /// Rows with a non-zero pick, in display order.
    pub fn picked_rows(&self) -> Vec<(&PicklistRow, Picked)> {
        self.order
            .iter()
            .map(|&idx| &self.rows[idx])
            .filter_map(|row| {
                let state = self.picked.get(row.key()).copied()?;
                state.is_picked().then_some((row, state))
            })
            .collect()
    }

    pub fn max_quantity(&self, key: &str) -> Option<u64> {
        self.row(key).map(|row| self.config.mode.max_for(row))
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PicklistEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<PicklistEvent> {
        self.events.drain()
    }

    /// Flip the checkbox of `key`. Only meaningful in checkbox mode.
    pub fn toggle_row(&mut self, key: &str) -> bool {
        if self.config.mode != PickMode::Checkbox {
            return false;
        }
        let Some(state) = self.picked.get_mut(key) else {
            return false;
        };
        *state = Picked::Flag(!state.is_picked());
        self.publish_update();
        true
    }

    /// Set an explicit quantity for `key`, clamped to `[0, max]` without
    /// complaint. Only meaningful in quantity mode.
    pub fn set_quantity(&mut self, key: &str, requested: i64) -> bool {
        if !matches!(self.config.mode, PickMode::Quantity { .. }) {
            return false;
        }
        let Some(row) = self.rows.iter().find(|row| row.key() == key) else {
            return false;
        };
        let amount = self.config.mode.clamp(row, requested);
        self.picked.insert(key.to_string(), Picked::Quantity(amount));
        self.publish_update();
        true
    }

    /// Pick every row (checkbox) or fill every row from its source quantity.
    /// When every row is already fully picked, clears them all instead.
    pub fn select_all(&mut self) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        if matches!(self.config.mode, PickMode::Quantity { source: None }) {
            return false;
        }
        let mode = &self.config.mode;
        let full: Vec<Picked> = self
            .rows
            .iter()
            .map(|row| mode.coerce(row, Picked::Flag(true)))
            .collect();
        let all_full = self
            .rows
            .iter()
            .zip(&full)
            .all(|(row, target)| self.picked.get(row.key()) == Some(target));
        for (row, target) in self.rows.iter().zip(full) {
            let next = if all_full { mode.unpicked() } else { target };
            self.picked.insert(row.key().to_string(), next);
        }
        self.publish_update();
        true
    }

    /// Header click on `column`; picks follow their rows into the new order.
    pub fn sort_by(&mut self, column: &str) {
        self.sort.cycle(column);
        self.order = display_order(&self.rows, &self.sort);
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.order = display_order(&self.rows, &self.sort);
    }

    /// Replace the row collection wholesale. Emits exactly one `Update` with
    /// the rebuilt map. A batch with duplicate or missing keys is rejected
    /// and leaves the picklist untouched.
    pub fn replace_rows(&mut self, records: Vec<Map<String, Value>>) -> Result<(), PicklistError> {
        let rows = build_rows(records, &self.config.key_column)?;
        self.picked = reconcile(&self.picked, &rows, &self.config.mode);
        self.rows = rows;
        self.order = display_order(&self.rows, &self.sort);
        self.publish_update();
        Ok(())
    }

    /// Upstream replaced the bound picked map. Unknown keys are ignored and
    /// quantities are clamped; no `Update` is emitted.
    pub fn set_picked(&mut self, picked: &PickedMap) {
        self.picked = reconcile(picked, &self.rows, &self.config.mode);
        self.publish_validity();
    }

    pub fn set_required(&mut self, required: bool) {
        self.config.required = required;
        self.publish_validity();
    }

    fn valid(&self) -> bool {
        !self.config.required || self.picked.values().any(Picked::is_picked)
    }

    fn publish_update(&mut self) {
        self.events.emit(WidgetEvent::Update(self.picked.clone()));
        self.publish_validity();
    }

    fn publish_validity(&mut self) {
        let valid = self.valid();
        publish_validity(&mut self.validity, &mut self.events, valid);
    }
}

impl FormWidget for Picklist {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Picklist
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        let count = self.picked.values().filter(|state| state.is_picked()).count();
        format!("{count} of {} picked", self.rows.len())
    }

    fn current_value(&self) -> Value {
        Value::Object(
            self.picked
                .iter()
                .map(|(key, state)| (key.clone(), state.to_value()))
                .collect(),
        )
    }
}
