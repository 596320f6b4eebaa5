use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::reference::ReferenceKind;
use crate::widgets::{DisplayLabels, SelectorBehaviour, WidgetPalette};

/// Engine-wide configuration: the widget palette and per-resource fetch
/// failure messages.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub(crate) palette: Arc<WidgetPalette>,
    pub(crate) fetch_messages: HashMap<String, String>,
}

impl EngineOptions {
    pub fn with_palette(mut self, palette: WidgetPalette) -> Self {
        self.palette = Arc::new(palette);
        self
    }

    pub fn with_selector_behaviour(self, behaviour: SelectorBehaviour) -> Self {
        self.map_palette(|palette| palette.with_selector_behaviour(behaviour))
    }

    pub fn with_selector_wrap(self, wrap: bool) -> Self {
        self.map_palette(|mut palette| {
            palette.selector = palette.selector.clone().with_wrap(wrap);
            palette
        })
    }

    pub fn with_labels(self, labels: DisplayLabels) -> Self {
        self.map_palette(|palette| palette.with_labels(labels))
    }

    pub fn with_empty_label(self, label: impl Into<Cow<'static, str>>) -> Self {
        let label = label.into();
        self.map_palette(|mut palette| {
            palette.labels = palette.labels.clone().with_empty_selection(label);
            palette
        })
    }

    pub fn with_fetch_message(mut self, kind: ReferenceKind, message: impl Into<String>) -> Self {
        self.fetch_messages
            .insert(kind.key().to_string(), message.into());
        self
    }

    pub fn palette(&self) -> Arc<WidgetPalette> {
        Arc::clone(&self.palette)
    }

    pub fn fetch_message(&self, kind: &ReferenceKind) -> String {
        self.fetch_messages
            .get(kind.key())
            .cloned()
            .unwrap_or_else(|| kind.fetch_error_message())
    }

    pub(crate) fn fetch_messages(&self) -> &HashMap<String, String> {
        &self.fetch_messages
    }

    fn map_palette(mut self, map: impl FnOnce(WidgetPalette) -> WidgetPalette) -> Self {
        let updated = map((*self.palette).clone());
        self.palette = Arc::new(updated);
        self
    }
}
