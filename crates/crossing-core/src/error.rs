use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed assessment document: {0}")]
    MalformedDocument(String),

    #[error("attachment index {index} out of range for '{field_id}' ({len} attached)")]
    AttachmentIndex {
        field_id: String,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Schema(#[from] crossing_schema::error::SchemaError),
}
