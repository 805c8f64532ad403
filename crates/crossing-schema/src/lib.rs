//! crossing-schema
//!
//! Static catalog of the bridge pipeline crossing inspection form. Pure
//! data: the sections, their fields in display order, option lists, and
//! the DOC gating rules that decide which system selector is relevant.

pub mod error;
pub mod field;
pub mod sections;

use std::sync::LazyLock;

use error::SchemaError;
use field::{ASSESSMENT_SUFFIX, FieldDescriptor, FieldKind};

pub use field::is_field_active;

/// Field id of the operating-company selector that gates the system fields.
pub const DOC_SELECTOR: &str = "doc";

/// Field id of the crossing identifier used to name saved documents.
pub const CROSSING_ID: &str = "crossing-id";

/// Field id of the narrative summary produced at report time.
pub const FINAL_SUMMARY: &str = "final-summary";

/// Trait implemented by each section of the form.
pub trait FormSection: Send + Sync {
    /// Unique identifier for this section (e.g., "pipe").
    fn id(&self) -> &str;

    /// Heading shown on the form and in the report.
    fn title(&self) -> &str;

    /// Fields in declared order.
    fn fields(&self) -> &[FieldDescriptor];

    fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.id == id)
    }
}

/// The ordered set of sections that make up one form.
pub struct FormSchema {
    sections: Vec<Box<dyn FormSection>>,
}

impl FormSchema {
    pub fn new(sections: Vec<Box<dyn FormSection>>) -> Self {
        Self { sections }
    }

    /// The bridge crossing inspection form.
    pub fn bridge_crossing() -> &'static FormSchema {
        static SCHEMA: LazyLock<FormSchema> = LazyLock::new(|| {
            FormSchema::new(vec![
                Box::new(sections::general::General),
                Box::new(sections::pipe::Pipe),
                Box::new(sections::support::Support),
                Box::new(sections::condition::Condition),
                Box::new(sections::photos::Photos),
                Box::new(sections::summary::Summary),
            ])
        });
        &SCHEMA
    }

    pub fn sections(&self) -> impl Iterator<Item = &dyn FormSection> {
        self.sections.iter().map(|s| s.as_ref())
    }

    pub fn section(&self, id: &str) -> Result<&dyn FormSection, SchemaError> {
        self.sections()
            .find(|s| s.id() == id)
            .ok_or_else(|| SchemaError::UnknownSection(id.to_string()))
    }

    /// All fields across all sections, in declared order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections.iter().flat_map(|s| s.fields())
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.id == id)
    }

    pub fn require_field(&self, id: &str) -> Result<&FieldDescriptor, SchemaError> {
        self.field(id)
            .ok_or_else(|| SchemaError::UnknownField(id.to_string()))
    }

    /// Look up a field that accepts attachments.
    pub fn require_file_field(&self, id: &str) -> Result<&FieldDescriptor, SchemaError> {
        let field = self.require_field(id)?;
        if field.kind != FieldKind::Files {
            return Err(SchemaError::NotAFileField(id.to_string()));
        }
        Ok(field)
    }

    pub fn file_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields().filter(|f| f.kind == FieldKind::Files)
    }

    /// Whether `key` is a declared field id or the derived source key of a
    /// field that has assessment sub-options.
    pub fn is_known_key(&self, key: &str) -> bool {
        if self.field(key).is_some() {
            return true;
        }
        key.strip_suffix(ASSESSMENT_SUFFIX)
            .and_then(|parent| self.field(parent))
            .is_some_and(|f| !f.assessment.is_empty())
    }

    /// Check that `value` is a declared option of `field_id`.
    pub fn validate_option(&self, field_id: &str, value: &str) -> Result<(), SchemaError> {
        let field = self.require_field(field_id)?;
        if field.kind.has_options() && field.option(value).is_none() {
            return Err(SchemaError::UnknownOption {
                field_id: field_id.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}
