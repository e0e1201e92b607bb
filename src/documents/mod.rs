//! Document Text Extraction
//!
//! Turns a stored upload into plain text for prompting. Extraction is
//! best-effort and never fails the request: the caller receives an
//! [`ExtractionOutcome`] that says whether text was found and, if not, why.

pub mod document_processor;

pub use document_processor::DocumentProcessor;

/// Upload formats accepted by the upload handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Match a lowercase or mixed-case extension without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("failed to parse DOCX: {0}")]
    Docx(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug)]
pub enum ExtractionOutcome {
    /// Non-blank text was found
    Text(String),
    /// The document parsed but holds no text
    Empty,
    /// No reader for this extension (includes legacy `.doc`)
    Unsupported { extension: String },
    /// Reading or parsing failed
    Failed(ExtractionError),
}

impl ExtractionOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Text(text) => Some(text),
            _ => None,
        }
    }
}
