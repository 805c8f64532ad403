use crossing_core::models::attachment::NewAttachment;
use crossing_core::projection::{
    TableRow, condition_score, narrative, report_images, tabular,
};
use crossing_core::store::AssessmentStore;
use crossing_schema::FormSchema;

fn schema() -> &'static FormSchema {
    FormSchema::bridge_crossing()
}

#[test]
fn scenario_support_and_temperature_lines() {
    let mut store = AssessmentStore::new();
    store.set("support-method", "hangers");
    store.set("installation-temp", "60");
    store.set("installation-temp-assessment", "Assumed");

    let text = narrative(schema(), &store.snapshot());

    assert!(text.contains("Primary Support Method: Hangers from Bridge Structure\n"));
    assert!(text.contains(
        "Installation Temperature (In Deg F.): 60\nInstallation Temperature (In Deg F.) (Source): Assumed\n"
    ));
}

#[test]
fn narrative_follows_schema_order() {
    let mut store = AssessmentStore::new();
    store.set("support-method", "hangers");
    store.set("crossing-id", "BR-1");
    store.set("pipe-material", "steel");

    assert_eq!(
        narrative(schema(), &store.snapshot()),
        "Crossing ID: BR-1\nPipe Material: Coated Steel\nPrimary Support Method: Hangers from Bridge Structure\n"
    );
}

#[test]
fn narrative_is_deterministic() {
    let mut store = AssessmentStore::new();
    store.set("town", "Lee");
    store.set("doc", "bng");
    store.set("bng", "ip");
    store.set_group(
        "observed-damage",
        vec!["gouges".to_string(), "dents".to_string()],
    );
    let doc = store.snapshot();

    let first = narrative(schema(), &doc);
    for _ in 0..5 {
        assert_eq!(narrative(schema(), &doc), first);
    }
    assert!(first.contains("Observed Damage: Gouges, Dents\n"));
}

#[test]
fn gated_systems_are_excluded_when_doc_differs() {
    let mut store = AssessmentStore::new();
    store.set("doc", "nu-nh");
    store.set("bng", "hp");
    store.set("fge", "lp");
    store.set("nu-nh", "ip");
    let doc = store.snapshot();

    let text = narrative(schema(), &doc);
    assert!(!text.contains("BNG System"));
    assert!(!text.contains("FGE System"));
    assert!(text.contains("NU/NH System: Intermediate Pressure (1-60 psig)\n"));

    let labels: Vec<String> = tabular(schema(), &doc)
        .into_iter()
        .filter_map(|row| match row {
            TableRow::Field { label, .. } => Some(label),
            TableRow::Heading { .. } => None,
        })
        .collect();
    assert!(!labels.iter().any(|l| l == "BNG System" || l == "FGE System"));
    assert!(labels.iter().any(|l| l == "NU/NH System"));
}

#[test]
fn gated_systems_are_excluded_without_doc() {
    let mut store = AssessmentStore::new();
    store.set("bng", "hp");
    assert_eq!(narrative(schema(), &store.snapshot()), "");
}

#[test]
fn tabular_groups_rows_under_headings() {
    let mut store = AssessmentStore::new();
    store.set("crossing-id", "BR-9");
    store.set("installation-temp", "55");
    store.set("installation-temp-assessment", "Measured");
    store.set("field-notes", "   ");

    let rows = tabular(schema(), &store.snapshot());
    assert_eq!(
        rows,
        vec![
            TableRow::Heading { title: "General Information".to_string() },
            TableRow::Field { label: "Crossing ID".to_string(), value: "BR-9".to_string() },
            TableRow::Heading { title: "Pipe Information".to_string() },
            TableRow::Field {
                label: "Installation Temperature (In Deg F.)".to_string(),
                value: "55".to_string(),
            },
            TableRow::Field {
                label: "Installation Temperature (In Deg F.) (Source)".to_string(),
                value: "Measured".to_string(),
            },
        ]
    );
}

#[test]
fn tabular_and_narrative_agree() {
    let mut store = AssessmentStore::new();
    store.set("doc", "fge");
    store.set("fge", "transmission");
    store.set_group("expansion", vec!["loop".to_string(), "offset".to_string()]);
    store.set_single_group("corrosion", Some("light".to_string()));
    let doc = store.snapshot();

    let from_table: String = tabular(schema(), &doc)
        .into_iter()
        .filter_map(|row| match row {
            TableRow::Field { label, value } => Some(format!("{label}: {value}\n")),
            TableRow::Heading { .. } => None,
        })
        .collect();
    assert_eq!(from_table, narrative(schema(), &doc));
}

#[test]
fn file_fields_are_not_projected() {
    let mut store = AssessmentStore::new();
    store.attach_files(
        "overview-photos",
        vec![NewAttachment {
            filename: "a.jpg".to_string(),
            content: vec![1],
            media_type: "image/jpeg".to_string(),
        }],
    );
    let doc = store.snapshot();
    assert_eq!(narrative(schema(), &doc), "");
    assert!(tabular(schema(), &doc).is_empty());
}

#[test]
fn source_without_parent_value_is_skipped() {
    let mut store = AssessmentStore::new();
    store.set("installation-temp-assessment", "Assumed");
    assert_eq!(narrative(schema(), &store.snapshot()), "");
}

#[test]
fn numbers_render_without_quotes() {
    let mut store = AssessmentStore::new();
    store.set("installation-temp", 60_i64);
    assert_eq!(
        narrative(schema(), &store.snapshot()),
        "Installation Temperature (In Deg F.): 60\n"
    );
}

#[test]
fn condition_score_sums_active_selections() {
    let mut store = AssessmentStore::new();
    store.set("doc", "bng");
    store.set("bng", "hp");
    store.set("fge", "transmission");
    store.set_single_group("corrosion", Some("severe".to_string()));
    store.set_group(
        "observed-damage",
        vec!["dents".to_string(), "debris".to_string()],
    );

    // hp 2 + severe 4 + dents 2 + debris 1; fge is inactive
    assert_eq!(condition_score(schema(), &store.snapshot()), 9);
}

#[test]
fn report_images_skip_unrenderable_types() {
    let mut store = AssessmentStore::new();
    store.attach_files(
        "overview-photos",
        vec![
            NewAttachment {
                filename: "a.jpg".to_string(),
                content: vec![1],
                media_type: "image/jpeg".to_string(),
            },
            NewAttachment {
                filename: "b.heic".to_string(),
                content: vec![2],
                media_type: "image/heic".to_string(),
            },
        ],
    );
    store.attach_files(
        "defect-photos",
        vec![NewAttachment {
            filename: "c.png".to_string(),
            content: vec![3],
            media_type: "image/png".to_string(),
        }],
    );
    store.set_comment("defect-photos", 0, "Dent at midspan").expect("exists");

    let images = report_images(schema(), &store.snapshot());
    let captions: Vec<&str> = images.iter().map(|i| i.caption.as_str()).collect();
    assert_eq!(
        captions,
        ["Crossing Overview: a.jpg", "Defects: Dent at midspan"]
    );
}

#[test]
fn blank_values_have_no_display_text() {
    use crossing_core::models::value::FieldValue;
    use crossing_core::projection::display_value;

    let field = schema().field("expansion").expect("declared");
    assert_eq!(display_value(field, &FieldValue::from("  ")), None);
    assert_eq!(
        display_value(field, &FieldValue::from(vec![String::new(), " ".to_string()])),
        None
    );
    assert_eq!(display_value(field, &FieldValue::Other(serde_json::Value::Null)), None);
    assert_eq!(
        display_value(field, &FieldValue::from(vec!["".to_string(), "loop".to_string()])),
        Some("Expansion Loop".to_string())
    );
}
