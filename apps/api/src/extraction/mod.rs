//! Text extraction: best-effort lowercase text from uploaded PDF bytes.
//!
//! Two stages evaluated in order:
//! 1. Text layer (`pdf-extract`). More than `MIN_TEXT_LAYER_CHARS` trimmed
//!    characters is terminal success.
//! 2. OCR (`pdftoppm` + `tesseract`) over every page, joined with a newline
//!    per page. Any OCR failure yields empty text.
//!
//! Errors never escape: each stage collapses into an `Extraction` value.

pub mod ocr;
pub mod text_layer;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub use ocr::{OcrEngine, TesseractOcr};
pub use text_layer::{PdfExtractReader, TextLayerReader};

/// Text-layer output at or below this many trimmed characters triggers OCR.
pub const MIN_TEXT_LAYER_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("text layer parse failed: {0}")]
    TextLayer(String),

    #[error("page rasterization failed: {0}")]
    Rasterize(String),

    #[error("rasterizer produced no page images")]
    NoPages,

    #[error("OCR failed on page {page}: {message}")]
    Recognize { page: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one extraction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Lowercased text, ready for matching.
    Extracted(String),
    /// Text layer missing, unreadable, or too short.
    NeedsFallback,
    /// OCR could not produce text.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
    None,
}

/// Final extractor output. `text` is empty when every stage failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedText {
    fn empty() -> Self {
        Self {
            text: String::new(),
            method: ExtractionMethod::None,
        }
    }
}

/// Stateless two-stage extractor shared by all requests.
#[derive(Clone)]
pub struct TextExtractor {
    reader: Arc<dyn TextLayerReader>,
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(reader: Arc<dyn TextLayerReader>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { reader, ocr }
    }

    pub async fn extract(&self, pdf_bytes: Bytes) -> ExtractedText {
        // The upload lives on disk for the whole request; OCR tools need a path.
        let upload = match write_temp_pdf(&pdf_bytes) {
            Ok(file) => Some(file),
            Err(e) => {
                error!("Could not stage upload in a temp file: {e}");
                None
            }
        };

        let result = match self.read_text_layer(pdf_bytes).await {
            Extraction::Extracted(text) => {
                info!("Text layer yielded {} characters", text.chars().count());
                ExtractedText {
                    text,
                    method: ExtractionMethod::TextLayer,
                }
            }
            Extraction::NeedsFallback | Extraction::Failed => match upload.as_ref() {
                Some(file) => match self.run_ocr(file.path()).await {
                    Extraction::Extracted(text) => {
                        info!("OCR yielded {} characters", text.chars().count());
                        ExtractedText {
                            text,
                            method: ExtractionMethod::Ocr,
                        }
                    }
                    _ => ExtractedText::empty(),
                },
                None => ExtractedText::empty(),
            },
        };

        if let Some(file) = upload {
            if let Err(e) = file.close() {
                debug!("Ignoring temp file cleanup failure: {e}");
            }
        }

        result
    }

    async fn read_text_layer(&self, pdf_bytes: Bytes) -> Extraction {
        let reader = Arc::clone(&self.reader);
        let joined = tokio::task::spawn_blocking(move || reader.read_text(&pdf_bytes)).await;

        match joined {
            Ok(Ok(raw)) => classify_text_layer(&raw),
            Ok(Err(e)) => {
                warn!("Text extraction failed: {e}");
                Extraction::NeedsFallback
            }
            Err(e) => {
                warn!("Text extraction task aborted: {e}");
                Extraction::NeedsFallback
            }
        }
    }

    async fn run_ocr(&self, pdf_path: &Path) -> Extraction {
        match self.ocr.recognize_pages(pdf_path).await {
            Ok(pages) => Extraction::Extracted(join_ocr_pages(&pages)),
            Err(e) => {
                error!("OCR failed: {e}");
                Extraction::Failed
            }
        }
    }
}

/// Decision rule for the text-layer stage.
pub fn classify_text_layer(raw: &str) -> Extraction {
    if raw.trim().chars().count() > MIN_TEXT_LAYER_CHARS {
        Extraction::Extracted(raw.to_lowercase())
    } else {
        Extraction::NeedsFallback
    }
}

/// Every page is followed by a newline, including the last.
fn join_ocr_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text.to_lowercase()
}

fn write_temp_pdf(pdf_bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".pdf")
        .tempfile()?;
    file.write_all(pdf_bytes)?;
    file.flush()?;
    Ok(file)
}
