use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; only unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Keyword file read once at startup.
    pub skills_path: PathBuf,
    pub ocr: OcrConfig,
    pub max_upload_bytes: usize,
}

/// External tools used by the OCR fallback.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
    pub dpi: u32,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            dpi: 200,
            lang: "eng".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = OcrConfig::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            skills_path: PathBuf::from(env_or("SKILLS_PATH", "roles.txt")),
            ocr: OcrConfig {
                tesseract_cmd: env_or("TESSERACT_CMD", &defaults.tesseract_cmd),
                pdftoppm_cmd: env_or("PDFTOPPM_CMD", &defaults.pdftoppm_cmd),
                dpi: parse_env("OCR_DPI", defaults.dpi)?,
                lang: env_or("OCR_LANG", &defaults.lang),
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
