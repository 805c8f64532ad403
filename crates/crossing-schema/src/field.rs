use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Suffix appended to a field id to form the key of its secondary
/// "source" sub-selection.
pub const ASSESSMENT_SUFFIX: &str = "-assessment";

/// The kind of control a field renders as, which also fixes the shape of
/// its stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Single-line free text.
    ShortText,
    /// Number typed as text; any representation is accepted.
    Numeric,
    /// Drop-down with one selected option.
    Select,
    /// Checkbox set; stores an ordered list of option values.
    MultiGroup,
    /// Radio set; stores one option value or nothing.
    SingleGroup,
    /// Multi-line free text.
    LongText,
    /// Ordered list of attached files with comments.
    Files,
    /// Calendar date, stored as `YYYY-MM-DD` text.
    Date,
}

impl FieldKind {
    /// Kinds whose stored values are option values that translate to
    /// display text.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiGroup | Self::SingleGroup)
    }
}

/// One selectable option. `score` carries the option's numeric effect on the
/// crossing condition score, kept apart from the selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionChoice {
    pub value: String,
    pub label: String,
    pub score: Option<u32>,
}

/// Relevance condition: the field only matters while `selector` holds `equals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Gate {
    pub selector: String,
    pub equals: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<OptionChoice>,
    /// Secondary "source" options stored under `<id>-assessment`.
    pub assessment: Vec<OptionChoice>,
    pub gate: Option<Gate>,
}

impl FieldDescriptor {
    pub fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            options: Vec::new(),
            assessment: Vec::new(),
            gate: None,
        }
    }

    pub fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| OptionChoice {
                value: value.to_string(),
                label: label.to_string(),
                score: None,
            })
            .collect();
        self
    }

    pub fn with_scored_options(mut self, options: &[(&str, &str, u32)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label, score)| OptionChoice {
                value: value.to_string(),
                label: label.to_string(),
                score: Some(*score),
            })
            .collect();
        self
    }

    /// Attach the standard data-source sub-options.
    pub fn with_source(mut self) -> Self {
        self.assessment = ["Measured", "Assumed", "Records", "Unknown"]
            .iter()
            .map(|s| OptionChoice {
                value: s.to_string(),
                label: s.to_string(),
                score: None,
            })
            .collect();
        self
    }

    pub fn gated(mut self, selector: &str, equals: &str) -> Self {
        self.gate = Some(Gate {
            selector: selector.to_string(),
            equals: equals.to_string(),
        });
        self
    }

    /// Store key of the secondary source selection, if this field has one.
    pub fn assessment_key(&self) -> Option<String> {
        if self.assessment.is_empty() {
            None
        } else {
            Some(format!("{}{ASSESSMENT_SUFFIX}", self.id))
        }
    }

    pub fn option(&self, value: &str) -> Option<&OptionChoice> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Translate a stored option value to its display text. Values the
    /// field does not declare (or fields without options) pass through.
    pub fn display_text<'a>(&'a self, value: &'a str) -> &'a str {
        self.option(value).map(|o| o.label.as_str()).unwrap_or(value)
    }

    pub fn assessment_display<'a>(&'a self, value: &'a str) -> &'a str {
        self.assessment
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    pub fn option_score(&self, value: &str) -> Option<u32> {
        self.option(value).and_then(|o| o.score)
    }
}

/// Whether `field` is currently relevant given the DOC selector's value.
///
/// Ungated fields are always active. Gated fields are active only on an
/// exact match; an unset selector deactivates every gated field.
pub fn is_field_active(field: &FieldDescriptor, doc_selection: Option<&str>) -> bool {
    match &field.gate {
        None => true,
        Some(gate) => doc_selection == Some(gate.equals.as_str()),
    }
}
