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

pub type SelectorEvent = WidgetEvent<Option<String>>;

#[derive(Debug, Clone)]
pub struct SelectorProps {
    pub options: Collection,
    pub selected: Option<String>,
    pub required: bool,
    pub add_option: Option<AddOptionLink>,
}

impl SelectorProps {
    pub fn new(options: Collection) -> Self {
        Self {
            options,
            selected: None,
            required: false,
            add_option: None,
        }
    }

    pub fn with_selected(mut self, selected: impl Into<String>) -> Self {
        self.selected = Some(selected.into());
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

impl Default for SelectorProps {
    fn default() -> Self {
        Self::new(empty_collection())
    }
}

/// One logical choice from an option list.
///
/// The empty selection is always `None`.
#[derive(Debug)]
pub struct SingleSelector {
    options: Collection,
    selected: Option<String>,
    required: bool,
    add_option: Option<AddOptionLink>,
    palette: Arc<WidgetPalette>,
    validity: ValidityLatch,
    events: Emitter<SelectorEvent>,
}

impl SingleSelector {
    pub fn new(props: SelectorProps) -> Self {
        let mut selector = Self {
            options: props.options,
            selected: props.selected.filter(|id| !id.is_empty()),
            required: props.required,
            add_option: props.add_option,
            palette: Arc::new(WidgetPalette::default()),
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        selector.events.emit(WidgetEvent::Ready);
        selector.publish_validity();
        selector
    }

    pub fn with_palette(mut self, palette: Arc<WidgetPalette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn options(&self) -> &Collection {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_option(&self) -> Option<&RefOption> {
        let id = self.selected.as_deref()?;
        self.options.iter().find(|option| option.id == id)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SelectorEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<SelectorEvent> {
        self.events.drain()
    }

    /// User picks `id`. Ids missing from the options are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !contains(&self.options, id) {
            return false;
        }
        self.commit(Some(id.to_string()));
        true
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(option) = self.options.get(index) else {
            return false;
        };
        let id = option.id.clone();
        self.commit(Some(id));
        true
    }

    /// User clears the choice; always emits `Update(None)`.
    pub fn clear(&mut self) {
        self.commit(None);
    }

    /// Upstream replaced the bound value. No `Update` is emitted.
    pub fn set_selected(&mut self, selected: Option<String>) {
        self.selected = selected.filter(|id| !id.is_empty());
        self.publish_validity();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.publish_validity();
    }

    /// Swap in a new option collection, keeping the selection if its id
    /// survives and resetting it (with an `Update(None)`) otherwise.
    pub fn set_options(&mut self, options: Collection) {
        self.options = options;
        let stale = self
            .selected
            .as_deref()
            .is_some_and(|id| !contains(&self.options, id));
        if stale {
            self.selected = None;
            self.events.emit(WidgetEvent::Update(None));
        }
        self.publish_validity();
    }

    /// Populate the options from the reference cache. On failure the widget
    /// is left without options, keeps its bound selection, and emits `Error`
    /// with the resource message.
    pub async fn load_options(&mut self, cache: &ReferenceCache, kind: &ReferenceKind) -> bool {
        match fetch_options(cache, kind).await {
            Ok(options) => {
                self.set_options(options);
                true
            }
            Err(message) => {
                self.options = empty_collection();
                self.events.emit(WidgetEvent::Error(message));
                false
            }
        }
    }

    pub fn can_add_option(&self, authorizer: &dyn Authorizer) -> bool {
        can_offer(self.add_option.as_ref(), authorizer)
    }

    /// Run the creation flow and select the option it produced. The cache is
    /// not touched; consumers react to `OptionAdded` if they want a refetch.
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
                self.commit(Some(option.id.clone()));
                Some(option)
            }
            CreationOutcome::Cancelled => None,
        }
    }

    fn commit(&mut self, selected: Option<String>) {
        self.selected = selected;
        self.events.emit(WidgetEvent::Update(self.selected.clone()));
        self.publish_validity();
    }

    fn valid(&self) -> bool {
        !self.required || self.selected.is_some()
    }

    fn publish_validity(&mut self) {
        let valid = self.valid();
        publish_validity(&mut self.validity, &mut self.events, valid);
    }

    fn step(&mut self, delta: i32) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let next = match self
            .selected
            .as_deref()
            .and_then(|id| position(&self.options, id))
        {
            Some(current) => step_index(
                current,
                self.options.len(),
                delta,
                self.palette.selector.wrap_around,
            ),
            None if delta < 0 => self.options.len() - 1,
            None => 0,
        };
        if self.selected.as_deref() == Some(self.options[next].id.as_str()) {
            return false;
        }
        self.select_index(next)
    }
}

impl FormWidget for SingleSelector {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Selector
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        match self.selected_option() {
            Some(option) => option.label.clone(),
            None => match &self.selected {
                Some(id) => id.clone(),
                None => self.palette.labels.empty_selection.to_string(),
            },
        }
    }

    fn current_value(&self) -> Value {
        self.selected.clone().map(Value::String).unwrap_or(Value::Null)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Left => self.step(-1),
            KeyCode::Down | KeyCode::Right => self.step(1),
            KeyCode::Delete | KeyCode::Backspace => {
                if self.selected.is_none() {
                    return false;
                }
                self.clear();
                true
            }
            _ => false,
        }
    }
}
