use crossterm::event::KeyEvent;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Selector,
    SelectorList,
    Picker,
    Picklist,
    Numeric,
    Text,
}

/// Behaviour shared by every input widget, independent of its value type.
pub trait FormWidget {
    fn kind(&self) -> WidgetKind;
    fn is_valid(&self) -> bool;
    fn display_value(&self) -> String;
    /// Current value in the shape a form submits it.
    fn current_value(&self) -> Value;
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let _ = key;
        false
    }
}
