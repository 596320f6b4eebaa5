mod base;
pub(crate) mod helpers;
mod numeric;
mod palette;
mod picker;
mod picklist;
mod selector;
mod selector_list;
mod text;

pub use base::{FormWidget, WidgetKind};
pub use numeric::{NumericEvent, NumericInput, NumericProps, StepSize};
pub use palette::{DisplayLabels, SelectorBehaviour, WidgetPalette};
pub use picker::{Picker, PickerEvent, PickerProps};
pub use picklist::{
    PickMode, Picked, PickedMap, Picklist, PicklistConfig, PicklistEvent, PicklistRow, SortOrder,
    SortState, compare_values, reconcile,
};
pub use selector::{SelectorEvent, SelectorProps, SingleSelector};
pub use selector_list::{SelectorList, SelectorListEvent, SelectorListProps, SlotView};
pub use text::{TextEvent, TextInput, TextProps};
