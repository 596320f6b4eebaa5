use std::sync::{Arc, LazyLock};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;
use serde_json::Value;

use super::helpers::publish_validity;
use super::{FormWidget, WidgetKind, WidgetPalette};
use crate::signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};

pub type NumericEvent = WidgetEvent<f64>;

const MAX_STEPS: usize = 3;
// f64 carries ~15 significant decimal digits; rounding beyond that is noise.
const MAX_DECIMAL_PLACES: u32 = 15;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("numeric pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSize {
    Small,
    Medium,
    Large,
}

impl StepSize {
    fn index(self) -> usize {
        match self {
            StepSize::Small => 0,
            StepSize::Medium => 1,
            StepSize::Large => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericProps {
    pub value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub decimal_places: u32,
    /// Small/medium/large steps; at most three are used.
    pub inc_dec_values: Vec<f64>,
}

impl NumericProps {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            min_value: f64::MIN,
            max_value: f64::MAX,
            decimal_places: 0,
            inc_dec_values: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = f64>) -> Self {
        self.inc_dec_values = steps.into_iter().collect();
        self
    }
}

impl Default for NumericProps {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A single number kept inside `[min_value, max_value]` and rounded to
/// `decimal_places`.
///
/// Text typed by the user sits in a buffer until `blur`, where anything that
/// is not a plain decimal number becomes `NaN`.
#[derive(Debug)]
pub struct NumericInput {
    value: f64,
    min_value: f64,
    max_value: f64,
    decimal_places: u32,
    steps: Vec<f64>,
    text: String,
    palette: Arc<WidgetPalette>,
    validity: ValidityLatch,
    events: Emitter<NumericEvent>,
}

impl NumericInput {
    pub fn new(props: NumericProps) -> Self {
        // A NaN bound means "unbounded" on that side.
        let lower = if props.min_value.is_nan() {
            f64::MIN
        } else {
            props.min_value
        };
        let upper = if props.max_value.is_nan() {
            f64::MAX
        } else {
            props.max_value
        };
        let (min_value, max_value) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let mut steps = props.inc_dec_values;
        steps.truncate(MAX_STEPS);
        let mut input = Self {
            value: f64::NAN,
            min_value,
            max_value,
            decimal_places: props.decimal_places.min(MAX_DECIMAL_PLACES),
            steps,
            text: String::new(),
            palette: Arc::new(WidgetPalette::default()),
            validity: ValidityLatch::default(),
            events: Emitter::new(),
        };
        input.value = input.normalize(props.value);
        input.text = input.formatted();
        input.events.emit(WidgetEvent::Ready);
        input.publish_validity();
        input
    }

    pub fn with_palette(mut self, palette: Arc<WidgetPalette>) -> Self {
        self.palette = palette;
        self.text = self.formatted();
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// Configured step sizes; one increment/decrement pair per entry.
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// Text currently in the edit buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The value rendered with the configured decimal places.
    pub fn formatted(&self) -> String {
        if self.value.is_nan() {
            return self.palette.labels.not_a_number.to_string();
        }
        format!("{:.*}", self.decimal_places as usize, self.value)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&NumericEvent) + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn drain_events(&mut self) -> Vec<NumericEvent> {
        self.events.drain()
    }

    pub fn increment(&mut self, size: StepSize) -> bool {
        self.step(size, 1.0)
    }

    pub fn decrement(&mut self, size: StepSize) -> bool {
        self.step(size, -1.0)
    }

    /// Replace the edit buffer. The value changes on `blur`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Commit the edit buffer: parse, clamp, round, and emit `Update` with
    /// the raw number (possibly `NaN`).
    pub fn blur(&mut self) {
        let trimmed = self.text.trim();
        let parsed = if NUMBER.is_match(trimmed) {
            trimmed.parse::<f64>().unwrap_or(f64::NAN)
        } else {
            f64::NAN
        };
        self.commit(parsed);
    }

    /// Upstream replaced the bound value. No `Update` is emitted.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.normalize(value);
        self.text = self.formatted();
        self.publish_validity();
    }

    fn step(&mut self, size: StepSize, direction: f64) -> bool {
        let Some(step) = self.steps.get(size.index()).copied() else {
            return false;
        };
        let base = if self.value.is_nan() {
            if self.min_value.is_finite() && self.min_value > f64::MIN {
                self.min_value
            } else {
                0.0
            }
        } else {
            self.value
        };
        self.commit(base + direction * step);
        true
    }

    fn commit(&mut self, value: f64) {
        self.value = self.normalize(value);
        self.text = self.formatted();
        self.events.emit(WidgetEvent::Update(self.value));
        self.publish_validity();
    }

    fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let clamped = value.clamp(self.min_value, self.max_value);
        let factor = 10f64.powi(self.decimal_places as i32);
        let rounded = (clamped * factor).round() / factor;
        if rounded.is_finite() {
            rounded.clamp(self.min_value, self.max_value)
        } else {
            clamped
        }
    }

    fn valid(&self) -> bool {
        !self.value.is_nan() && self.value >= self.min_value && self.value <= self.max_value
    }

    fn publish_validity(&mut self) {
        let valid = self.valid();
        publish_validity(&mut self.validity, &mut self.events, valid);
    }
}

impl FormWidget for NumericInput {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Numeric
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn display_value(&self) -> String {
        self.formatted()
    }

    fn current_value(&self) -> Value {
        serde_json::Number::from_f64(self.value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let size = if key.modifiers.contains(KeyModifiers::CONTROL) {
            StepSize::Large
        } else if key.modifiers.contains(KeyModifiers::SHIFT) {
            StepSize::Medium
        } else {
            StepSize::Small
        };
        match key.code {
            KeyCode::Right | KeyCode::Up => self.increment(size),
            KeyCode::Left | KeyCode::Down => self.decrement(size),
            KeyCode::Char(ch) if ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E') => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                self.text.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.text.pop();
                true
            }
            KeyCode::Delete => {
                self.text.clear();
                true
            }
            KeyCode::Enter => {
                self.blur();
                true
            }
            _ => false,
        }
    }
}
