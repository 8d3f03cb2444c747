/// Errors that can occur while analyzing a name list.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("file content is empty")]
    EmptyInput,

    #[error("input is too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to read spreadsheet")]
    Spreadsheet(#[from] calamine::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 content")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    #[error("name matching failed: {reason}")]
    Matcher { reason: String },
}
