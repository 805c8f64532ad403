use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("field '{field_id}' has no option '{value}'")]
    UnknownOption { field_id: String, value: String },

    #[error("field '{0}' does not take attachments")]
    NotAFileField(String),
}
