use futures::executor::block_on;
use serde_json::json;

use crate::io::DocumentFormat;
use crate::reference::{FixtureFetcher, RefOption, ReferenceCache, ReferenceKind};

#[test]
fn serves_collections_from_a_json_document() {
    let raw = r#"{
        "crops": ["BEAN", {"id": "KALE", "name": "Kale"}],
        "tray_sizes": [{"id": 128}, {"id": 256}]
    }"#;
    let fetcher = FixtureFetcher::from_document(raw, DocumentFormat::Json).unwrap();
    let cache = ReferenceCache::new(fetcher);

    let crops = block_on(cache.get(&ReferenceKind::Crops)).unwrap();
    assert_eq!(crops.len(), 2);
    assert_eq!(crops[1].label, "Kale");

    let trays = block_on(cache.get(&ReferenceKind::TraySizes)).unwrap();
    assert_eq!(trays[0].id, "128");
    assert_eq!(trays[0].label, "128");
}

#[test]
fn missing_collections_fail_with_the_resource_message() {
    let fetcher = FixtureFetcher::new()
        .with_collection(ReferenceKind::Crops, vec![RefOption::plain("BEAN")]);
    let cache = ReferenceCache::new(fetcher);

    let err = block_on(cache.get(&ReferenceKind::Locations)).unwrap_err();
    assert_eq!(err.message, "Unable to fetch locations.");
    assert!(err.detail.contains("locations"));
}

#[test]
fn rejects_documents_that_are_not_objects() {
    assert!(FixtureFetcher::from_value(&json!(["BEAN"])).is_err());
    assert!(FixtureFetcher::from_value(&json!({"crops": [null]})).is_err());
}
