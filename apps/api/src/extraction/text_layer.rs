//! Direct text-layer extraction via `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};

use crate::extraction::ExtractionError;

/// Reads the embedded text layer of a PDF. Implemented by `PdfExtractReader`;
/// tests substitute fixed text.
pub trait TextLayerReader: Send + Sync {
    fn read_text(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed reader. Pages are concatenated in document order.
pub struct PdfExtractReader;

impl TextLayerReader for PdfExtractReader {
    fn read_text(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract can panic on malformed documents
        match panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(pdf_bytes)
        })) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::TextLayer(e.to_string())),
            Err(_) => Err(ExtractionError::TextLayer(
                "pdf-extract panicked while parsing the document".to_string(),
            )),
        }
    }
}
