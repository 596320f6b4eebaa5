#![deny(rust_2018_idioms)]

pub mod creation;
pub mod error;
pub mod form;
pub mod io;
pub mod options;
pub mod reference;
pub mod signal;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use creation::{AddOptionLink, AllowAll, Authorizer, CreationFlow, CreationOutcome, DenyAll};
pub use error::{FetchError, PicklistError};
pub use form::FormValidity;
pub use io::{DocumentFormat, parse_document_str};
pub use options::EngineOptions;
pub use reference::{
    Collection, FixtureFetcher, RefOption, ReferenceCache, ReferenceFetcher, ReferenceKind,
};
pub use signal::{Emitter, Subscription, ValidityLatch, WidgetEvent};
pub use widgets::{
    FormWidget, NumericInput, NumericProps, PickMode, Picked, PickedMap, Picker, PickerProps,
    Picklist, PicklistConfig, PicklistRow, SelectorList, SelectorListProps, SelectorProps,
    SingleSelector, SortOrder, SortState, StepSize, TextInput, TextProps, WidgetKind,
    WidgetPalette,
};

pub mod prelude {
    pub use super::{
        EngineOptions, FormValidity, FormWidget, ReferenceCache, ReferenceKind, WidgetEvent,
    };
}
