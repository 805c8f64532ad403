use std::collections::BTreeMap;

use crossing_schema::DOC_SELECTOR;
use tracing::debug;

use crate::error::CoreError;
use crate::models::attachment::{FileAttachment, NewAttachment};
use crate::models::document::{AssessmentDocument, escape_value_key, unescape_value_key};
use crate::models::value::FieldValue;

/// Mutable state of one open inspection.
///
/// Field values and file attachments live side by side, both keyed by
/// field id. The store does not check keys against the schema; that is the
/// presentation layer's concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentStore {
    values: BTreeMap<String, FieldValue>,
    files: BTreeMap<String, Vec<FileAttachment>>,
}

impl AssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scalar value (text, number, date, single select).
    pub fn set(&mut self, field_id: &str, value: impl Into<FieldValue>) {
        self.values.insert(field_id.to_string(), value.into());
    }

    /// Replace the full selection of a checkbox group.
    pub fn set_group(&mut self, field_id: &str, selected: Vec<String>) {
        self.values
            .insert(field_id.to_string(), FieldValue::Many(selected));
    }

    /// Set a radio group; `None` clears the selection.
    pub fn set_single_group(&mut self, field_id: &str, selected: Option<String>) {
        self.values.insert(
            field_id.to_string(),
            FieldValue::Text(selected.unwrap_or_default()),
        );
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// The current DOC selector value; empty counts as unset.
    pub fn doc_selection(&self) -> Option<&str> {
        self.values
            .get(DOC_SELECTOR)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Append files to a field's attachment list, in the order given, each
    /// with an empty comment. Returns the new list length.
    pub fn attach_files(&mut self, field_id: &str, files: Vec<NewAttachment>) -> usize {
        let list = self.files.entry(field_id.to_string()).or_default();
        let added = files.len();
        list.extend(files.into_iter().map(FileAttachment::from));
        debug!(field_id, added, total = list.len(), "attached files");
        list.len()
    }

    pub fn attachments(&self, field_id: &str) -> &[FileAttachment] {
        self.files.get(field_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edit the comment of one attachment. Out-of-range indices are an error.
    pub fn set_comment(
        &mut self,
        field_id: &str,
        index: usize,
        comment: impl Into<String>,
    ) -> Result<(), CoreError> {
        let attachment = self.attachment_mut(field_id, index)?;
        attachment.comment = comment.into();
        Ok(())
    }

    pub fn remove_attachment(
        &mut self,
        field_id: &str,
        index: usize,
    ) -> Result<FileAttachment, CoreError> {
        let len = self.attachments(field_id).len();
        match self.files.get_mut(field_id) {
            Some(list) if index < len => Ok(list.remove(index)),
            _ => Err(CoreError::AttachmentIndex {
                field_id: field_id.to_string(),
                index,
                len,
            }),
        }
    }

    fn attachment_mut(
        &mut self,
        field_id: &str,
        index: usize,
    ) -> Result<&mut FileAttachment, CoreError> {
        let len = self.attachments(field_id).len();
        self.files
            .get_mut(field_id)
            .and_then(|list| list.get_mut(index))
            .ok_or_else(|| CoreError::AttachmentIndex {
                field_id: field_id.to_string(),
                index,
                len,
            })
    }

    /// Current state as a portable document. Value keys are escaped so none
    /// can shadow the attachment member.
    pub fn snapshot(&self) -> AssessmentDocument {
        AssessmentDocument {
            files: self.files.clone(),
            values: self
                .values
                .iter()
                .map(|(key, value)| (escape_value_key(key), value.clone()))
                .collect(),
        }
    }

    /// Merge a document into the store. Keys present in the document
    /// overwrite; keys absent keep their current value. Attachment lists of
    /// fields present in the document are replaced, not appended to.
    pub fn restore(&mut self, document: AssessmentDocument) {
        let AssessmentDocument { files, values } = document;
        debug!(
            values = values.len(),
            file_fields = files.len(),
            "restoring assessment document"
        );
        self.values.extend(
            values
                .into_iter()
                .map(|(key, value)| (unescape_value_key(key), value)),
        );
        self.files.extend(files);
    }

    /// Parse and restore a serialized document. The document is parsed in
    /// full before anything is applied, so a malformed input leaves the
    /// store unchanged.
    pub fn open(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
        let document = AssessmentDocument::from_slice(bytes)?;
        self.restore(document);
        Ok(())
    }
}
