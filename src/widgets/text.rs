use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;
use serde_json::Value;

use super::helpers::publish_validity;
use super::{FormWidget, WidgetKind};
use crate::signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};

pub type TextEvent = WidgetEvent<String>;

#[derive(Debug, Clone, Default)]
pub struct TextProps {
    pub value: String,
    pub required: bool,
    pub pattern: Option<Regex>,
}

impl TextProps {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Non-empty values must match `pattern` in full.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(self)
    }
}

/// Free-text entry with required/pattern validity.
#[derive(Debug)]
pub struct TextInput {
    value: String,
    required: bool,
    pattern: Option<Regex>,
    validity: ValidityLatch,
    events: Emitter<TextEvent>,
}

impl TextInput {
    pub fn new(props: TextProps) -> Self {
        let mut input = Self {
            value: props.value,
            required: props.required,
            pattern: props.pattern,
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        input.events.emit(WidgetEvent::Ready);
        input.publish_validity();
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TextEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<TextEvent> {
        self.events.drain()
    }

    /// User edit.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.events.emit(WidgetEvent::Update(self.value.clone()));
        self.publish_validity();
    }

    /// Upstream replaced the bound value. No `Update` is emitted.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.publish_validity();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.publish_validity();
    }

    fn valid(&self) -> bool {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return !self.required;
        }
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(trimmed))
    }

    fn publish_validity(&mut self) {
        let valid = self.valid();
        publish_validity(&mut self.validity, &mut self.events, valid);
    }
}

impl FormWidget for TextInput {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        self.value.clone()
    }

    fn current_value(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let mut next = self.value.clone();
        match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                next.push(ch);
            }
            KeyCode::Backspace => {
                if next.pop().is_none() {
                    return false;
                }
            }
            KeyCode::Delete => {
                if next.is_empty() {
                    return false;
                }
                next.clear();
            }
            _ => return false,
        }
        self.input(next);
        true
    }
}
