use crossing_core::models::document::{AssessmentDocument, sanitize_file_stem};
use crossing_core::models::value::FieldValue;
use crossing_core::store::AssessmentStore;

#[test]
fn unknown_keys_round_trip() {
    let raw = br#"{
        "legacy-field": "kept",
        "retired-flags": {"a": true},
        "mixed": [1, "two"],
        "count": 12.5,
        "fileData": {}
    }"#;
    let doc = AssessmentDocument::from_slice(raw).expect("parses");
    assert_eq!(doc.get("legacy-field"), Some(&FieldValue::from("kept")));
    assert!(matches!(doc.get("retired-flags"), Some(FieldValue::Other(_))));
    assert!(matches!(doc.get("mixed"), Some(FieldValue::Other(_))));
    assert!(matches!(doc.get("count"), Some(FieldValue::Number(_))));

    let reparsed = AssessmentDocument::from_slice(&doc.to_json_pretty().expect("serializes"))
        .expect("reparses");
    assert_eq!(reparsed, doc);
}

#[test]
fn serialization_is_stable() {
    let mut store = AssessmentStore::new();
    store.set("town", "Lee");
    store.set("crossing-id", "BR-7");
    store.set_group("expansion", vec!["loop".to_string()]);

    let first = store.snapshot().to_json_pretty().expect("serializes");
    let second = AssessmentDocument::from_slice(&first)
        .expect("parses")
        .to_json_pretty()
        .expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn file_data_is_nested_and_base64() {
    let mut store = AssessmentStore::new();
    store.attach_files(
        "overview-photos",
        vec![crossing_core::models::attachment::NewAttachment {
            filename: "a.jpg".to_string(),
            content: vec![1, 2, 3],
            media_type: "image/jpeg".to_string(),
        }],
    );
    let json: serde_json::Value =
        serde_json::from_slice(&store.snapshot().to_json_pretty().expect("serializes"))
            .expect("valid json");

    let entry = &json["fileData"]["overview-photos"][0];
    assert_eq!(entry["filename"], "a.jpg");
    assert_eq!(entry["comment"], "");
    assert_eq!(entry["content"], "AQID");
    assert_eq!(entry["mediaType"], "image/jpeg");
}

#[test]
fn data_url_content_is_accepted() {
    let raw = br#"{"fileData": {"overview-photos": [{"filename": "a.png", "comment": "c", "content": "data:image/png;base64,AQID", "mediaType": "image/png"}]}}"#;
    let doc = AssessmentDocument::from_slice(raw).expect("parses");
    assert_eq!(doc.files["overview-photos"][0].content, vec![1, 2, 3]);
}

#[test]
fn missing_file_data_defaults_to_empty() {
    let doc = AssessmentDocument::from_slice(br#"{"town": "Lee"}"#).expect("parses");
    assert!(doc.files.is_empty());
}

#[test]
fn save_file_name_uses_crossing_id_and_date() {
    let mut store = AssessmentStore::new();
    store.set("crossing-id", "BR 104/A");
    let date = jiff::civil::date(2026, 3, 9);
    assert_eq!(store.snapshot().save_file_name(date), "BR-104-A_2026-03-09.json");

    let empty = AssessmentStore::new();
    assert_eq!(empty.snapshot().save_file_name(date), "crossing_2026-03-09.json");
}

#[test]
fn sanitize_keeps_safe_characters() {
    assert_eq!(sanitize_file_stem("  X_1.2-b "), "X_1.2-b");
    assert_eq!(sanitize_file_stem("a:b"), "a-b");
}

#[test]
fn value_named_like_file_data_survives_save_and_open() {
    let mut store = AssessmentStore::new();
    store.set("fileData", "x");
    store.set("\\odd", "y");
    store.attach_files(
        "support-photos",
        vec![crossing_core::models::attachment::NewAttachment {
            filename: "a.jpg".to_string(),
            content: vec![9, 8, 7],
            media_type: "image/jpeg".to_string(),
        }],
    );

    let bytes = store.snapshot().to_json_pretty().expect("serializes");
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
    assert!(json["fileData"]["support-photos"].is_array());

    let mut reopened = AssessmentStore::new();
    reopened.open(&bytes).expect("opens");
    assert_eq!(reopened.get("fileData"), Some(&FieldValue::from("x")));
    assert_eq!(reopened.get("\\odd"), Some(&FieldValue::from("y")));
    assert_eq!(reopened.attachments("support-photos").len(), 1);
    assert_eq!(reopened, store);
}
