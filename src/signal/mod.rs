mod emitter;
mod latch;

pub use emitter::{Emitter, Subscription};
pub use latch::ValidityLatch;

use crate::reference::RefOption;

/// Outbound signal of a widget.
///
/// `Update` always carries the full new value, never a delta.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent<T> {
    Ready,
    Valid(bool),
    Update(T),
    /// A creation flow produced a new option. The reference cache is left alone;
    /// invalidating it is up to whoever receives this.
    OptionAdded(RefOption),
    Error(String),
}

impl<T> WidgetEvent<T> {
    pub fn as_valid(&self) -> Option<bool> {
        match self {
            WidgetEvent::Valid(valid) => Some(*valid),
            _ => None,
        }
    }

    pub fn as_update(&self) -> Option<&T> {
        match self {
            WidgetEvent::Update(value) => Some(value),
            _ => None,
        }
    }
}
