use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A file attached to one file-list field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FileAttachment {
    pub filename: String,
    #[serde(default)]
    pub comment: String,
    /// Raw bytes; base64 in the portable document.
    #[serde(with = "base64_content")]
    #[ts(type = "string")]
    pub content: Vec<u8>,
    pub media_type: String,
}

/// A freshly selected file, before it is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl From<NewAttachment> for FileAttachment {
    fn from(file: NewAttachment) -> Self {
        Self {
            filename: file.filename,
            comment: String::new(),
            content: file.content,
            media_type: file.media_type,
        }
    }
}

/// Media type for a filename, from its extension.
pub fn media_type_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

mod base64_content {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// Accepts plain base64 as well as a `data:<type>;base64,` URL.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let payload = match encoded.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => encoded.as_str(),
        };
        STANDARD
            .decode(payload.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
