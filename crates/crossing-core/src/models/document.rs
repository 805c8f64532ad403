use std::collections::BTreeMap;

use crossing_schema::{CROSSING_ID, DOC_SELECTOR};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::attachment::FileAttachment;
use crate::models::value::FieldValue;

/// The portable save/open unit.
///
/// On disk this is one JSON object: every field value sits at the top level
/// under its field id, and `fileData` maps each file-list field id to its
/// ordered attachments. Keys are kept in `BTreeMap`s so the serialized form
/// is stable for a given state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDocument {
    #[serde(rename = "fileData", default)]
    pub files: BTreeMap<String, Vec<FileAttachment>>,
    #[serde(flatten)]
    pub values: BTreeMap<String, FieldValue>,
}

impl AssessmentDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::MalformedDocument(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// The current value of the DOC selector, if one is set.
    pub fn doc_selection(&self) -> Option<&str> {
        self.values
            .get(DOC_SELECTOR)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Download name for a save: `<crossing-id>_<YYYY-MM-DD>.json`.
    pub fn save_file_name(&self, today: jiff::civil::Date) -> String {
        let crossing = self
            .values
            .get(CROSSING_ID)
            .and_then(FieldValue::as_text)
            .map(sanitize_file_stem)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "crossing".to_string());
        format!("{crossing}_{}.json", today.strftime("%Y-%m-%d"))
    }
}

/// Top-level member that holds attachments in the portable document.
pub const FILE_DATA_KEY: &str = "fileData";

const KEY_ESCAPE: char = '\\';

/// On-disk form of a value key. A value stored under [`FILE_DATA_KEY`] would
/// otherwise collide with the attachment member, so that key and any key
/// already starting with the escape character gain one leading escape.
pub fn escape_value_key(key: &str) -> String {
    if key == FILE_DATA_KEY || key.starts_with(KEY_ESCAPE) {
        format!("{KEY_ESCAPE}{key}")
    } else {
        key.to_string()
    }
}

/// Inverse of [`escape_value_key`].
pub fn unescape_value_key(key: String) -> String {
    match key.strip_prefix(KEY_ESCAPE) {
        Some(rest) => rest.to_string(),
        None => key,
    }
}

/// Replace characters that are unsafe in file names with `-`.
pub fn sanitize_file_stem(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
