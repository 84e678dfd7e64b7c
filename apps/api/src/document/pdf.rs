use std::panic::{self, AssertUnwindSafe};

use super::DocumentError;

/// Extracts the text layer of a PDF held in memory.
///
/// `pdf-extract` can panic on malformed input; a panic is reported as
/// `ExtractionFailed` rather than tearing down the worker thread.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocumentError::ExtractionFailed(format!(
            "Failed to extract text from PDF file: {e}"
        ))),
        Err(_) => Err(DocumentError::ExtractionFailed(
            "Failed to extract text from PDF file: decoder aborted on malformed input".to_string(),
        )),
    }
}
