//! Read-only views of a document used to feed the narrative generator and
//! the report renderer.
//!
//! Both views walk the schema in declared order and share one row builder,
//! so the text sent for AI summarisation and the table printed in the
//! report always agree on which fields appear and how values read.

use crossing_schema::field::{FieldDescriptor, FieldKind};
use crossing_schema::{FormSchema, is_field_active};
use serde::{Deserialize, Serialize};

use crate::models::document::AssessmentDocument;
use crate::models::value::FieldValue;

/// Separator between the display texts of a multi-selection.
pub const LIST_SEPARATOR: &str = ", ";

/// Media types the report renderer can embed.
pub const RENDERABLE_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// One row of the report body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableRow {
    /// Full-width section title.
    Heading { title: String },
    Field { label: String, value: String },
}

/// A photograph to embed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportImage {
    pub field_id: String,
    pub caption: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

/// Display text for a stored value, or `None` when it is empty.
pub fn display_value(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match value {
        FieldValue::Text(s) => Some(field.display_text(s).to_string()),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Many(items) => Some(
            items
                .iter()
                .filter(|s| !s.trim().is_empty())
                .map(|s| field.display_text(s))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        ),
        FieldValue::Other(serde_json::Value::Bool(b)) => {
            Some(if *b { "Yes" } else { "No" }.to_string())
        }
        FieldValue::Other(v) => Some(v.to_string()),
    }
}

fn source_display(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) if !s.trim().is_empty() => Some(field.assessment_display(s).to_string()),
        FieldValue::Text(_) => None,
        other => display_value(field, other),
    }
}

/// Label/value rows for every active, non-empty, non-file field, grouped
/// by section title. Sections with no rows are omitted.
fn section_rows<'s>(
    schema: &'s FormSchema,
    document: &AssessmentDocument,
) -> Vec<(&'s str, Vec<(String, String)>)> {
    let doc = document.doc_selection();
    let mut out = Vec::new();

    for section in schema.sections() {
        let mut rows = Vec::new();
        for field in section.fields() {
            if field.kind == FieldKind::Files || !is_field_active(field, doc) {
                continue;
            }
            let Some(value) = document.get(&field.id).and_then(|v| display_value(field, v))
            else {
                continue;
            };
            rows.push((field.label.clone(), value));

            if let Some(source) = field
                .assessment_key()
                .and_then(|key| document.get(&key))
                .and_then(|v| source_display(field, v))
            {
                rows.push((format!("{} (Source)", field.label), source));
            }
        }
        if !rows.is_empty() {
            out.push((section.title(), rows));
        }
    }

    out
}

/// Flattened `label: value` lines, one per line, in schema order.
pub fn narrative(schema: &FormSchema, document: &AssessmentDocument) -> String {
    let mut text = String::new();
    for (_, rows) in section_rows(schema, document) {
        for (label, value) in rows {
            text.push_str(&label);
            text.push_str(": ");
            text.push_str(&value);
            text.push('\n');
        }
    }
    text
}

/// Section headings followed by their label/value rows.
pub fn tabular(schema: &FormSchema, document: &AssessmentDocument) -> Vec<TableRow> {
    let mut table = Vec::new();
    for (title, rows) in section_rows(schema, document) {
        table.push(TableRow::Heading {
            title: title.to_string(),
        });
        table.extend(
            rows.into_iter()
                .map(|(label, value)| TableRow::Field { label, value }),
        );
    }
    table
}

/// Sum of option scores over every active selection.
pub fn condition_score(schema: &FormSchema, document: &AssessmentDocument) -> u32 {
    let doc = document.doc_selection();
    schema
        .fields()
        .filter(|f| f.kind.has_options() && is_field_active(f, doc))
        .filter_map(|f| document.get(&f.id).map(|v| (f, v)))
        .map(|(field, value)| match value {
            FieldValue::Text(s) => field.option_score(s).unwrap_or(0),
            FieldValue::Many(items) => items
                .iter()
                .filter_map(|s| field.option_score(s))
                .sum(),
            _ => 0,
        })
        .sum()
}

/// Embeddable photographs from every file field, in schema then attachment
/// order. Captions read `<field label>: <comment>`, falling back to the
/// filename when no comment was written.
pub fn report_images(schema: &FormSchema, document: &AssessmentDocument) -> Vec<ReportImage> {
    schema
        .file_fields()
        .filter_map(|field| document.files.get(&field.id).map(|list| (field, list)))
        .flat_map(|(field, list)| {
            list.iter()
                .filter(|a| RENDERABLE_MEDIA_TYPES.contains(&a.media_type.as_str()))
                .map(move |a| ReportImage {
                    field_id: field.id.clone(),
                    caption: if a.comment.trim().is_empty() {
                        format!("{}: {}", field.label, a.filename)
                    } else {
                        format!("{}: {}", field.label, a.comment.trim())
                    },
                    media_type: a.media_type.clone(),
                    content: a.content.clone(),
                })
        })
        .collect()
}
