//! Text extraction from uploaded resume documents.
//!
//! Every failure here is a "document unreadable" condition: the pipeline
//! never sees a document it could not turn into text.

mod docx;
mod pdf;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Legacy binary Word. Accepted at upload, rejected at decode.
    Doc,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "doc" => Some(DocumentKind::Doc),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
            DocumentKind::Doc => ".doc",
        }
    }
}

/// Plain text of a document plus its page count, when the format has pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: Option<u32>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file format: {0}. Supported: .pdf, .docx")]
    UnsupportedFormat(&'static str),

    #[error("Error parsing resume: {0}")]
    Malformed(String),

    #[error("Failed to extract text from resume")]
    NoText,
}

pub fn extract_document(
    bytes: &[u8],
    kind: DocumentKind,
) -> Result<ExtractedDocument, DocumentError> {
    let (text, page_count) = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => (docx::extract(bytes)?, None),
        DocumentKind::Doc => return Err(DocumentError::UnsupportedFormat(kind.extension())),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(DocumentError::NoText);
    }

    Ok(ExtractedDocument {
        text: text.to_string(),
        page_count,
    })
}
