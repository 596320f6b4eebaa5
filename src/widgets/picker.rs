use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;

use super::helpers::{fetch_options, publish_validity, step_index, with_option};
use super::{FormWidget, WidgetKind, WidgetPalette};
use crate::creation::{AddOptionLink, Authorizer, CreationFlow, CreationOutcome, can_offer};
use crate::reference::{
    Collection, RefOption, ReferenceCache, ReferenceKind, contains, empty_collection, position,
};
use crate::signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};

pub type PickerEvent = WidgetEvent<Vec<String>>;

#[derive(Debug, Clone)]
pub struct PickerProps {
    pub options: Collection,
    pub picked: Vec<String>,
    /// At least one option must be picked.
    pub required: bool,
    pub add_option: Option<AddOptionLink>,
}

impl PickerProps {
    pub fn new(options: Collection) -> Self {
        Self {
            options,
            picked: Vec::new(),
            required: false,
            add_option: None,
        }
    }

    pub fn with_picked<I, S>(mut self, picked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.picked = picked.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_add_option(mut self, link: AddOptionLink) -> Self {
        self.add_option = Some(link);
        self
    }
}

impl Default for PickerProps {
    fn default() -> Self {
        Self::new(empty_collection())
    }
}

/// Set of independently toggleable choices over a fixed option list.
///
/// `picked` is kept in option order so every `Update` carries the same
/// ordering regardless of the order the user clicked in.
#[derive(Debug)]
pub struct Picker {
    options: Collection,
    picked: Vec<String>,
    required: bool,
    add_option: Option<AddOptionLink>,
    focus: usize,
    palette: Arc<WidgetPalette>,
    validity: ValidityLatch,
    events: Emitter<PickerEvent>,
}

impl Picker {
    pub fn new(props: PickerProps) -> Self {
        let mut picker = Self {
            options: props.options,
            picked: Vec::new(),
            required: props.required,
            add_option: props.add_option,
            focus: 0,
            palette: Arc::new(WidgetPalette::default()),
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        picker.picked = picker.normalized(props.picked);
        picker.events.emit(WidgetEvent::Ready);
        picker.publish_validity();
        picker
    }

    pub fn with_palette(mut self, palette: Arc<WidgetPalette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn options(&self) -> &Collection {
        &self.options
    }

    pub fn picked(&self) -> &[String] {
        &self.picked
    }

    pub fn is_picked(&self, id: &str) -> bool {
        self.picked.iter().any(|picked| picked == id)
    }

    pub fn all_picked(&self) -> bool {
        !self.options.is_empty() && self.options.iter().all(|option| self.is_picked(&option.id))
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PickerEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<PickerEvent> {
        self.events.drain()
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        if !contains(&self.options, id) {
            return false;
        }
        if self.is_picked(id) {
            self.picked.retain(|picked| picked != id);
        } else {
            let mut next = std::mem::take(&mut self.picked);
            next.push(id.to_string());
            self.picked = self.normalized(next);
        }
        self.publish_update();
        true
    }

    pub fn select_all(&mut self) {
        self.picked = self.options.iter().map(|option| option.id.clone()).collect();
        self.publish_update();
    }

    pub fn deselect_all(&mut self) {
        self.picked.clear();
        self.publish_update();
    }

    /// Select everything, or clear everything when all options are already
    /// picked.
    pub fn toggle_all(&mut self) {
        if self.all_picked() {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    /// Upstream replaced the bound value. No `Update` is emitted.
    pub fn set_picked<I, S>(&mut self, picked: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.picked = self.normalized(picked.into_iter().map(Into::into).collect());
        self.publish_validity();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.publish_validity();
    }

    /// Swap in new options and prune picks whose id vanished. `Update` is
    /// emitted only when the prune removed something.
    pub fn set_options(&mut self, options: Collection) {
        self.options = options;
        self.focus = self.focus.min(self.options.len().saturating_sub(1));
        let before = self.picked.len();
        let options = &self.options;
        self.picked.retain(|id| contains(options, id));
        let pruned = self.picked.len() != before;
        let retained = std::mem::take(&mut self.picked);
        self.picked = self.normalized(retained);
        if pruned {
            self.publish_update();
        } else {
            self.publish_validity();
        }
    }

    pub async fn load_options(&mut self, cache: &ReferenceCache, kind: &ReferenceKind) -> bool {
        match fetch_options(cache, kind).await {
            Ok(options) => {
                self.set_options(options);
                true
            }
            Err(message) => {
                self.options = empty_collection();
                self.focus = 0;
                self.events.emit(WidgetEvent::Error(message));
                false
            }
        }
    }

    pub fn can_add_option(&self, authorizer: &dyn Authorizer) -> bool {
        can_offer(self.add_option.as_ref(), authorizer)
    }

    /// Run the creation flow and pick the option it produced.
    pub async fn add_option<F>(
        &mut self,
        flow: &mut F,
        authorizer: &dyn Authorizer,
    ) -> Option<RefOption>
    where
        F: CreationFlow + ?Sized,
    {
        if !self.can_add_option(authorizer) {
            return None;
        }
        let link = self.add_option.clone()?;
        match flow.launch(&link).await {
            CreationOutcome::Created(option) => {
                self.options = with_option(&self.options, &option);
                self.events.emit(WidgetEvent::OptionAdded(option.clone()));
                if !self.is_picked(&option.id) {
                    self.toggle(&option.id);
                }
                Some(option)
            }
            CreationOutcome::Cancelled => None,
        }
    }

    /// Deduplicate and order by option position. Ids not (yet) among the
    /// options keep their relative order at the end.
    fn normalized(&self, picked: Vec<String>) -> Vec<String> {
        let mut unique: Vec<String> = Vec::with_capacity(picked.len());
        for id in picked {
            if !id.is_empty() && !unique.contains(&id) {
                unique.push(id);
            }
        }
        unique.sort_by_key(|id| position(&self.options, id).unwrap_or(usize::MAX));
        unique
    }

    fn valid(&self) -> bool {
        !self.required || !self.picked.is_empty()
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

impl FormWidget for Picker {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Picker
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        let labels = self
            .options
            .iter()
            .filter(|option| self.is_picked(&option.id))
            .map(|option| option.label.clone())
            .collect::<Vec<_>>();
        if labels.is_empty() {
            format!("[] {}", self.palette.labels.empty_selection)
        } else {
            format!("[{}]", labels.join(", "))
        }
    }

    fn current_value(&self) -> Value {
        Value::Array(self.picked.iter().cloned().map(Value::String).collect())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                let next = step_index(self.focus, self.options.len(), -1, false);
                let moved = next != self.focus;
                self.focus = next;
                moved
            }
            KeyCode::Down => {
                let next = step_index(self.focus, self.options.len(), 1, false);
                let moved = next != self.focus;
                self.focus = next;
                moved
            }
            KeyCode::Char(' ') => {
                let Some(option) = self.options.get(self.focus) else {
                    return false;
                };
                let id = option.id.clone();
                self.toggle(&id)
            }
            KeyCode::Char('a') => {
                if self.options.is_empty() {
                    return false;
                }
                self.toggle_all();
                true
            }
            _ => false,
        }
    }
}
