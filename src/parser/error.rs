/// Errors that can occur while reading a telemetry file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// File extension is neither `.json` nor `.xml`.
    #[error("unsupported file extension on `{0}` (expected .xml or .json)")]
    UnsupportedExtension(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed XML document.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8 encoding error in tag names or attributes.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Document structure does not match the expected dataset shape.
    #[error("invalid document structure: {0}")]
    InvalidStructure(String),

    /// The file parsed but holds no data points.
    #[error("file contains no data points")]
    EmptyPointSet,
}
