mod analysis;
mod config;
mod errors;
mod extraction;
mod routes;
mod scoring;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{PdfExtractReader, TesseractOcr, TextExtractor};
use crate::routes::build_router;
use crate::skills::load_skills;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Scorer v{}", env!("CARGO_PKG_VERSION"));

    // Skill list is read once; requests never reload it
    let skills = Arc::new(load_skills(&config.skills_path));
    info!("{} skills active (source: {:?})", skills.len(), skills.source());

    info!(
        "OCR fallback: {} + {} at {} dpi ({})",
        config.ocr.pdftoppm_cmd, config.ocr.tesseract_cmd, config.ocr.dpi, config.ocr.lang
    );
    let extractor = TextExtractor::new(
        Arc::new(PdfExtractReader),
        Arc::new(TesseractOcr::new(config.ocr.clone())),
    );

    let state = AppState {
        config: config.clone(),
        skills,
        extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
