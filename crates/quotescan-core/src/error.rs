#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("could not process file: {0}")]
    MalformedInput(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' given more than once")]
    DuplicateColumn(String),

    #[error("unknown extraction backend '{0}' (expected 'bbox' or 'layout')")]
    UnknownBackend(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
