//! Document text extraction: turns an uploaded PDF or Word file into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers never reach for a
//! decoder directly. The default `DocumentTextExtractor` decodes on tokio's
//! blocking pool: PDF and DOCX decoding is CPU-bound and must stay off the
//! request threads.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MSWORD_MIME: &str = "application/msword";

/// Upload ceiling used when `MAX_UPLOAD_BYTES` is not configured (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type '{0}'. Please upload a PDF or Word document")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("File size {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("Uploaded file is empty")]
    Empty,
}

/// Recognised resume container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// `application/msword`. Decoded as OOXML; true binary `.doc` files fail extraction.
    LegacyWord,
}

impl DocumentKind {
    /// Classifies a declared MIME type. Parameters and case are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, DocumentError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(DocumentKind::Pdf),
            DOCX_MIME => Ok(DocumentKind::Docx),
            MSWORD_MIME => Ok(DocumentKind::LegacyWord),
            _ => Err(DocumentError::UnsupportedFormat(mime.to_string())),
        }
    }

    /// Guesses a kind from a file extension, for clients that send no content type.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "doc" => Some(DocumentKind::LegacyWord),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
            DocumentKind::LegacyWord => MSWORD_MIME,
        }
    }
}

/// Checks type and size before any decoding is attempted.
pub fn validate_upload(
    mime: &str,
    size: usize,
    max_bytes: usize,
) -> Result<DocumentKind, DocumentError> {
    let kind = DocumentKind::from_mime(mime)?;
    if size == 0 {
        return Err(DocumentError::Empty);
    }
    if size > max_bytes {
        return Err(DocumentError::TooLarge {
            size,
            max: max_bytes,
        });
    }
    Ok(kind)
}

/// Synchronous decode of an already-classified document.
pub fn decode(kind: DocumentKind, bytes: &[u8]) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => pdf::extract_text(bytes),
        DocumentKind::Docx | DocumentKind::LegacyWord => docx::extract_text(bytes),
    }
}

/// The document-to-text capability. Implement this to swap decoders without
/// touching the handlers.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes, mime: &str) -> Result<String, DocumentError>;
}

/// Default extractor: `pdf-extract` for PDF, ZIP + XML streaming for Word.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract_text(&self, bytes: Bytes, mime: &str) -> Result<String, DocumentError> {
        let kind = DocumentKind::from_mime(mime)?;
        let size = bytes.len();

        let result = tokio::task::spawn_blocking(move || decode(kind, &bytes))
            .await
            .map_err(|e| DocumentError::ExtractionFailed(format!("Decoder task failed: {e}")))?;

        match &result {
            Ok(text) => info!(
                ?kind,
                bytes = size,
                chars = text.chars().count(),
                "document text extracted"
            ),
            Err(e) => warn!(?kind, bytes = size, "document extraction failed: {e}"),
        }

        result
    }
}
