use std::sync::Arc;

use serde_json::Value;

use super::helpers::{fetch_options, publish_validity, with_option};
use super::{FormWidget, WidgetKind, WidgetPalette};
use crate::creation::{AddOptionLink, Authorizer, CreationFlow, CreationOutcome, can_offer};
use crate::reference::{
    Collection, RefOption, ReferenceCache, ReferenceKind, contains, empty_collection,
};
use crate::signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};

pub type SelectorListEvent = WidgetEvent<Vec<String>>;

#[derive(Debug, Clone)]
pub struct SelectorListProps {
    pub options: Collection,
    pub selected: Vec<String>,
    pub required: bool,
    pub add_option: Option<AddOptionLink>,
}

impl SelectorListProps {
    pub fn new(options: Collection) -> Self {
        Self {
            options,
            selected: Vec::new(),
            required: false,
            add_option: None,
        }
    }

    pub fn with_selected<I, S>(mut self, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = selected.into_iter().map(Into::into).collect();
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

impl Default for SelectorListProps {
    fn default() -> Self {
        Self::new(empty_collection())
    }
}

/// Rendering state of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub index: usize,
    pub selected: Option<&'a str>,
    pub required: bool,
    pub valid: bool,
    pub deletable: bool,
}

/// Ordered list of single-value selectors sharing one option collection.
///
/// Holds the `N` chosen ids and always renders `N + 1` slots; the trailing
/// slot is the empty one. Choosing into the trailing slot appends a new
/// trailing slot, clearing an earlier slot splices it out.
#[derive(Debug)]
pub struct SelectorList {
    options: Collection,
    chosen: Vec<String>,
    required: bool,
    add_option: Option<AddOptionLink>,
    palette: Arc<WidgetPalette>,
    validity: ValidityLatch,
    events: Emitter<SelectorListEvent>,
}

impl SelectorList {
    pub fn new(props: SelectorListProps) -> Self {
        let mut list = Self {
            options: props.options,
            chosen: compact(props.selected),
            required: props.required,
            add_option: props.add_option,
            palette: Arc::new(WidgetPalette::default()),
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        list.events.emit(WidgetEvent::Ready);
        list.publish_validity();
        list
    }

    pub fn with_palette(mut self, palette: Arc<WidgetPalette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn options(&self) -> &Collection {
        &self.options
    }

    pub fn selected(&self) -> &[String] {
        &self.chosen
    }

    pub fn slot_count(&self) -> usize {
        self.chosen.len() + 1
    }

    pub fn slot(&self, index: usize) -> Option<SlotView<'_>> {
        if index >= self.slot_count() {
            return None;
        }
        let selected = self.chosen.get(index).map(String::as_str);
        let required = self.required && index == 0;
        Some(SlotView {
            index,
            selected,
            required,
            valid: !required || selected.is_some(),
            deletable: self.is_deletable(index),
        })
    }

    pub fn slots(&self) -> Vec<SlotView<'_>> {
        (0..self.slot_count())
            .filter_map(|index| self.slot(index))
            .collect()
    }

    /// Whether the delete affordance is offered on `index`: never on the
    /// trailing empty slot, and never on the last remaining choice of a
    /// required list.
    pub fn is_deletable(&self, index: usize) -> bool {
        index < self.chosen.len() && (!self.required || self.chosen.len() > 1)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SelectorListEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<SelectorListEvent> {
        self.events.drain()
    }

    /// User chooses `id` in slot `index`.
    pub fn choose(&mut self, index: usize, id: &str) -> bool {
        if !contains(&self.options, id) {
            return false;
        }
        match index.cmp(&self.chosen.len()) {
            std::cmp::Ordering::Less => self.chosen[index] = id.to_string(),
            std::cmp::Ordering::Equal => self.chosen.push(id.to_string()),
            std::cmp::Ordering::Greater => return false,
        }
        self.publish_update();
        true
    }

    /// User clears slot `index`. The slot is removed and later slots shift
    /// down; clearing the trailing empty slot does nothing.
    pub fn clear(&mut self, index: usize) -> bool {
        if index >= self.chosen.len() {
            return false;
        }
        self.chosen.remove(index);
        self.publish_update();
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.clear(index)
    }

    /// Upstream replaced the bound value. No `Update` is emitted.
    pub fn set_selected<I, S>(&mut self, selected: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chosen = compact(selected.into_iter().map(Into::into).collect());
        self.publish_validity();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.publish_validity();
    }

    /// Swap in new options. Choices whose id vanished are dropped; an
    /// `Update` is emitted only when that actually removed something.
    pub fn set_options(&mut self, options: Collection) {
        self.options = options;
        let before = self.chosen.len();
        let options = &self.options;
        self.chosen.retain(|id| contains(options, id));
        if self.chosen.len() != before {
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
                self.events.emit(WidgetEvent::Error(message));
                false
            }
        }
    }

    pub fn can_add_option(&self, authorizer: &dyn Authorizer) -> bool {
        can_offer(self.add_option.as_ref(), authorizer)
    }

    /// Run the creation flow from slot `index` and choose the new option there.
    pub async fn add_option<F>(
        &mut self,
        index: usize,
        flow: &mut F,
        authorizer: &dyn Authorizer,
    ) -> Option<RefOption>
    where
        F: CreationFlow + ?Sized,
    {
        if index >= self.slot_count() || !self.can_add_option(authorizer) {
            return None;
        }
        let link = self.add_option.clone()?;
        match flow.launch(&link).await {
            CreationOutcome::Created(option) => {
                self.options = with_option(&self.options, &option);
                self.events.emit(WidgetEvent::OptionAdded(option.clone()));
                self.choose(index, &option.id);
                Some(option)
            }
            CreationOutcome::Cancelled => None,
        }
    }

    fn valid(&self) -> bool {
        !self.required || !self.chosen.is_empty()
    }

    fn publish_update(&mut self) {
        self.events.emit(WidgetEvent::Update(self.chosen.clone()));
        self.publish_validity();
    }

    fn publish_validity(&mut self) {
        let valid = self.valid();
        publish_validity(&mut self.validity, &mut self.events, valid);
    }
}

impl FormWidget for SelectorList {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SelectorList
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        if self.chosen.is_empty() {
            return self.palette.labels.empty_selection.to_string();
        }
        self.chosen
            .iter()
            .map(|id| {
                self.options
                    .iter()
                    .find(|option| &option.id == id)
                    .map(|option| option.label.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn current_value(&self) -> Value {
        Value::Array(self.chosen.iter().cloned().map(Value::String).collect())
    }
}

fn compact(selected: Vec<String>) -> Vec<String> {
    selected.into_iter().filter(|id| !id.is_empty()).collect()
}
