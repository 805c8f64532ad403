use serde::{Deserialize, Serialize};

/// A stored field value. The shape follows the field's kind, but the store
/// never checks it: values for keys the schema does not know (or in shapes
/// it does not expect) are kept as-is so they survive a save/open cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, dates, numbers typed as text, and single selections.
    Text(String),
    /// A number that arrived as a JSON number.
    Number(serde_json::Number),
    /// Ordered selections of a checkbox group.
    Many(Vec<String>),
    /// Anything else found in a loaded document.
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Many(items) => items.iter().all(|s| s.trim().is_empty()),
            Self::Other(v) => v.is_null(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<serde_json::Number> for FieldValue {
    fn from(n: serde_json::Number) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::Many(items)
    }
}
