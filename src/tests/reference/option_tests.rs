use serde_json::json;

use crate::reference::RefOption;

#[test]
fn equality_uses_the_identifier_only() {
    assert_eq!(RefOption::new("BEAN", "Bean"), RefOption::new("BEAN", "Beans"));
    assert_ne!(RefOption::new("BEAN", "Bean"), RefOption::new("KALE", "Bean"));
}

#[test]
fn deserializes_strings_and_records() {
    let options: Vec<RefOption> = serde_json::from_value(json!([
        "BEAN",
        {"id": 7, "name": "Chisel Plow"},
        {"value": "GH-1", "title": "Greenhouse 1"},
        {"id": "KALE", "label": "Kale"}
    ]))
    .unwrap();

    assert_eq!(options[0].label, "BEAN");
    assert_eq!(options[1].id, "7");
    assert_eq!(options[1].label, "Chisel Plow");
    assert_eq!(options[2].id, "GH-1");
    assert_eq!(options[2].label, "Greenhouse 1");
    assert_eq!(options[3].label, "Kale");
}

#[test]
fn rejects_structured_or_empty_ids() {
    assert!(serde_json::from_value::<RefOption>(json!({"id": {"nested": 1}})).is_err());
    assert!(serde_json::from_value::<RefOption>(json!({"id": ""})).is_err());
}

#[test]
fn serializes_as_id_and_label() {
    let value = serde_json::to_value(RefOption::new("BEAN", "Bean")).unwrap();
    assert_eq!(value, json!({"id": "BEAN", "label": "Bean"}));
}
