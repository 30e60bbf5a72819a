//! OCR fallback: rasterize every page with `pdftoppm`, then run `tesseract`
//! on each image.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::OcrConfig;
use crate::extraction::ExtractionError;

/// Recognizes text in a PDF on disk, returning one string per page in order.
/// Any failure discards the whole document.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize_pages(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// Poppler + Tesseract command-line backend.
pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    async fn rasterize(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let output = Command::new(&self.config.pdftoppm_cmd)
            .arg("-png")
            .arg("-r")
            .arg(self.config.dpi.to_string())
            .arg(pdf_path)
            .arg(out_dir.join("page"))
            .output()
            .await
            .map_err(|e| {
                ExtractionError::Rasterize(format!(
                    "failed to run {}: {e}",
                    self.config.pdftoppm_cmd
                ))
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Rasterize(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let mut images: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        sort_page_images(&mut images);

        if images.is_empty() {
            return Err(ExtractionError::NoPages);
        }
        Ok(images)
    }

    async fn recognize_image(&self, image: &Path, page: usize) -> Result<String, ExtractionError> {
        let output = Command::new(&self.config.tesseract_cmd)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.lang)
            .output()
            .await
            .map_err(|e| ExtractionError::Recognize {
                page,
                message: format!("failed to run {}: {e}", self.config.tesseract_cmd),
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Recognize {
                page,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize_pages(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractionError> {
        let image_dir = tempfile::tempdir()?;
        let images = self.rasterize(pdf_path, image_dir.path()).await?;
        debug!(
            "Rasterized {} pages at {} dpi",
            images.len(),
            self.config.dpi
        );

        let mut pages = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let page = i + 1;
            pages.push(self.recognize_image(image, page).await?);
            debug!("OCR page {page}/{} done", images.len());
        }
        Ok(pages)
    }
}

/// Orders `page-N.png` files by page number. pdftoppm zero-pads to the width
/// of the page count, but numeric ordering does not rely on that.
fn sort_page_images(images: &mut [PathBuf]) {
    images.sort_by_key(|p| (page_number(p).unwrap_or(u32::MAX), p.clone()));
}

fn page_number(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .rsplit('-')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_images_sorted_numerically() {
        let mut images = vec![
            PathBuf::from("/tmp/x/page-10.png"),
            PathBuf::from("/tmp/x/page-2.png"),
            PathBuf::from("/tmp/x/page-1.png"),
        ];
        sort_page_images(&mut images);
        assert_eq!(
            images,
            vec![
                PathBuf::from("/tmp/x/page-1.png"),
                PathBuf::from("/tmp/x/page-2.png"),
                PathBuf::from("/tmp/x/page-10.png"),
            ]
        );
    }

    #[test]
    fn test_page_number_handles_zero_padding() {
        assert_eq!(page_number(Path::new("page-007.png")), Some(7));
        assert_eq!(page_number(Path::new("cover.png")), None);
    }

    #[tokio::test]
    async fn test_missing_rasterizer_is_a_rasterize_error() {
        let engine = TesseractOcr::new(OcrConfig {
            pdftoppm_cmd: "definitely-not-a-real-pdftoppm-binary".to_string(),
            ..OcrConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("scan.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        let result = engine.recognize_pages(&pdf).await;
        assert!(matches!(result, Err(ExtractionError::Rasterize(_))));
    }
}
