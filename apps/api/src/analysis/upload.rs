//! Multipart upload parsing and validation.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

pub const UPLOAD_FIELD: &str = "file";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A single PDF pulled from the request body.
#[derive(Debug)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl PdfUpload {
    /// Size in KB with one decimal.
    pub fn size_kb(&self) -> f64 {
        (self.bytes.len() as f64 / 1024.0 * 10.0).round() / 10.0
    }
}

/// Reads the `file` field, ignoring any other fields.
pub async fn read_pdf_upload(mut multipart: Multipart, limit: usize) -> Result<PdfUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload.pdf".to_string());
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if !is_pdf(content_type.as_deref(), &file_name, &bytes) {
            return Err(AppError::Validation(format!(
                "{file_name} is not a PDF file"
            )));
        }

        return Ok(PdfUpload { file_name, bytes });
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// Accepts a declared PDF content type, a `.pdf` name, or PDF magic bytes.
pub fn is_pdf(content_type: Option<&str>, file_name: &str, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf")
        || file_name.to_ascii_lowercase().ends_with(".pdf")
        || head.starts_with(PDF_MAGIC)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_content_type() {
        assert!(is_pdf(Some("Application/PDF"), "blob", b"whatever"));
    }

    #[test]
    fn test_is_pdf_by_extension() {
        assert!(is_pdf(None, "Resume.PDF", b"whatever"));
    }

    #[test]
    fn test_is_pdf_by_magic_bytes() {
        assert!(is_pdf(Some("application/octet-stream"), "blob", b"%PDF-1.7\n"));
    }

    #[test]
    fn test_plain_text_rejected() {
        assert!(!is_pdf(Some("text/plain"), "notes.txt", b"hello"));
    }

    #[test]
    fn test_size_kb_one_decimal() {
        let upload = PdfUpload {
            file_name: "a.pdf".to_string(),
            bytes: Bytes::from(vec![0u8; 1536]),
        };
        assert_eq!(upload.size_kb(), 1.5);
    }
}
