use crate::form::FormValidity;
use crate::tests::support::crops;
use crate::widgets::{SelectorProps, SingleSelector, TextInput, TextProps};

#[test]
fn form_flag_changes_only_on_edges() {
    let mut form = FormValidity::new();
    assert!(form.is_valid());

    assert_eq!(form.set("crop", true), Some(true));
    assert_eq!(form.set("quantity", false), Some(false));
    assert_eq!(form.set("quantity", false), None);
    assert_eq!(form.set("notes", false), None);
    assert_eq!(form.invalid_fields(), vec!["quantity", "notes"]);

    assert_eq!(form.set("quantity", true), None);
    assert_eq!(form.remove("notes"), Some(true));
    assert_eq!(form.len(), 2);
}

#[test]
fn observes_widget_validity() {
    let mut form = FormValidity::new();
    let mut selector = SingleSelector::new(SelectorProps::new(crops()).with_required(true));
    let notes = TextInput::new(TextProps::default());

    assert_eq!(form.observe("crop", &selector), Some(false));
    assert_eq!(form.observe("notes", &notes), None);
    assert_eq!(form.field("crop"), Some(false));

    selector.select("KALE");
    assert_eq!(form.observe("crop", &selector), Some(true));
    assert!(form.is_valid());
}
