//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::upload::{read_pdf_upload, PdfUpload};
use crate::errors::AppError;
use crate::extraction::ExtractionMethod;
use crate::scoring::matcher::{match_skills, MatchQuality};
use crate::scoring::report::{
    analysis_report, extracted_text_artifact, text_preview, Artifact, TextStats,
};
use crate::skills::SkillSource;
use crate::state::AppState;

/// Extracted text below this many trimmed characters stops the analysis.
pub const MIN_USABLE_TEXT_CHARS: usize = 20;

const SKILL_PREVIEW_LIMIT: usize = 15;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub file_name: String,
    pub file_size_kb: f64,
    pub extraction_method: ExtractionMethod,
    pub text_stats: TextStats,
    pub text_preview: String,
    /// Percentage of skills found, one decimal place.
    pub score: f64,
    pub quality: MatchQuality,
    pub headline: String,
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub found_count: usize,
    pub missing_count: usize,
    pub total_skills: usize,
    pub report: Artifact,
    pub extracted_text: Artifact,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub count: usize,
    pub source: SkillSource,
    pub skills: Vec<String>,
    /// Alphabetical sample for the upload page.
    pub preview: Vec<String>,
    pub remaining: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    #[default]
    Report,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub artifact: ArtifactKind,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload (`file`). Extracts text, scores it against the loaded
/// skills, and returns metrics plus both downloadable artifacts.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let upload = read_pdf_upload(multipart, state.config.max_upload_bytes).await?;
    Ok(Json(analyze_upload(&state, upload).await?))
}

/// POST /api/v1/analyze/download?artifact=report|text
///
/// Same pipeline as `/analyze`, but responds with one artifact as a
/// `text/plain` attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_pdf_upload(multipart, state.config.max_upload_bytes).await?;
    let analysis = analyze_upload(&state, upload).await?;

    let artifact = match query.artifact {
        ArtifactKind::Report => analysis.report,
        ArtifactKind::Text => analysis.extracted_text,
    };
    Ok(attachment(artifact))
}

/// GET /api/v1/skills
pub async fn handle_get_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let (preview, remaining) = state.skills.preview(SKILL_PREVIEW_LIMIT);
    Json(SkillsResponse {
        count: state.skills.len(),
        source: state.skills.source(),
        skills: state.skills.as_slice().to_vec(),
        preview,
        remaining,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

async fn analyze_upload(state: &AppState, upload: PdfUpload) -> Result<AnalysisResponse, AppError> {
    let file_size_kb = upload.size_kb();
    let PdfUpload { file_name, bytes } = upload;
    info!("Analyzing {file_name} ({file_size_kb:.1} KB)");

    let extracted = state.extractor.extract(bytes).await;
    if extracted.text.trim().chars().count() < MIN_USABLE_TEXT_CHARS {
        return Err(AppError::ExtractionFailed { file_name });
    }

    let skills = state.skills.as_slice();
    let result = match_skills(&extracted.text, skills);
    let quality = result.quality();
    info!(
        "{file_name}: {}/{} skills found ({:.1}%) via {:?}",
        result.found.len(),
        skills.len(),
        result.score,
        extracted.method
    );

    let report = analysis_report(&file_name, &result, skills.len());
    let extracted_text = extracted_text_artifact(&file_name, &extracted.text);

    Ok(AnalysisResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        file_size_kb,
        extraction_method: extracted.method,
        text_stats: TextStats::of(&extracted.text),
        text_preview: text_preview(&extracted.text),
        score: result.display_score(),
        quality,
        headline: quality.headline(result.score),
        found_count: result.found.len(),
        missing_count: result.missing.len(),
        total_skills: skills.len(),
        found: result.found,
        missing: result.missing,
        report,
        extracted_text,
        file_name,
    })
}

fn attachment(artifact: Artifact) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name.replace('"', "")
    );
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.content,
    )
        .into_response()
}
