use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::skills::SkillList;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; every request scores against the same list.
    pub skills: Arc<SkillList>,
    pub extractor: TextExtractor,
}
