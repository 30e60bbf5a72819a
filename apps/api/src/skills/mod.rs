//! Skill keyword list: loaded once at startup from a plain-text keyword file,
//! with built-in fallbacks so a missing or broken file never stops the service.

pub mod loader;

use serde::Serialize;

pub use loader::load_skills;

/// Used when the keyword file does not exist.
pub const DEFAULT_SKILLS: [&str; 8] = [
    "python",
    "java",
    "javascript",
    "html",
    "css",
    "sql",
    "react",
    "node.js",
];

/// Used when the keyword file exists but cannot be read.
pub const FALLBACK_SKILLS: [&str; 3] = ["python", "html", "css"];

/// Lines starting with this marker are section headers, not skills.
pub const SECTION_HEADER_MARKER: &str = "===";

/// Where a `SkillList` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    File,
    /// Keyword file absent.
    Default,
    /// Keyword file present but unreadable.
    Fallback,
}

/// Ordered lowercase skill keywords. Duplicates are kept as given.
#[derive(Debug, Clone, Serialize)]
pub struct SkillList {
    skills: Vec<String>,
    source: SkillSource,
}

impl SkillList {
    pub fn new(skills: Vec<String>, source: SkillSource) -> Self {
        Self { skills, source }
    }

    pub fn defaults() -> Self {
        Self::from_static(&DEFAULT_SKILLS, SkillSource::Default)
    }

    pub fn fallback() -> Self {
        Self::from_static(&FALLBACK_SKILLS, SkillSource::Fallback)
    }

    fn from_static(skills: &[&str], source: SkillSource) -> Self {
        Self::new(skills.iter().map(|s| s.to_string()).collect(), source)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn source(&self) -> SkillSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Alphabetical preview of at most `limit` skills plus how many were left out.
    pub fn preview(&self, limit: usize) -> (Vec<String>, usize) {
        let mut sorted = self.skills.clone();
        sorted.sort();
        let remaining = sorted.len().saturating_sub(limit);
        sorted.truncate(limit);
        (sorted, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_eight_builtin_skills() {
        let list = SkillList::defaults();
        assert_eq!(list.len(), 8);
        assert_eq!(list.source(), SkillSource::Default);
        assert_eq!(list.as_slice()[7], "node.js");
    }

    #[test]
    fn test_fallback_is_three_skills() {
        let list = SkillList::fallback();
        assert_eq!(list.as_slice(), &["python", "html", "css"]);
        assert_eq!(list.source(), SkillSource::Fallback);
    }

    #[test]
    fn test_preview_sorts_and_counts_remaining() {
        let list = SkillList::defaults();
        let (preview, remaining) = list.preview(3);
        assert_eq!(preview, vec!["css", "html", "java"]);
        assert_eq!(remaining, 5);
    }

    #[test]
    fn test_preview_larger_than_list() {
        let (preview, remaining) = SkillList::fallback().preview(15);
        assert_eq!(preview.len(), 3);
        assert_eq!(remaining, 0);
    }
}
