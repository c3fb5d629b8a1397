use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors surfaced while turning a source tree into a [`crate::Document`].
///
/// Soft-missing fields (organization, date, receiver titles) never show up here;
/// they resolve to `None` or an empty string on the model instead.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document type `{0}` is not supported")]
    UnsupportedDocumentType(String),

    #[error("required field `{0}` is missing")]
    MissingRequiredField(&'static str),

    #[error("failed to read document source: {0}")]
    Io(#[from] std::io::Error),

    #[error("document source is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed XML stream: {0}")]
    XmlStream(#[from] quick_xml::Error),

    #[error("element `{0}` is never closed")]
    Truncated(String),

    #[error("document source contains no root element")]
    EmptySource,

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedDocumentType(tag.into())
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField(field)
    }
}
