use std::path::Path;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::skills::{SkillList, SkillSource, SECTION_HEADER_MARKER};

#[derive(Debug, Error)]
pub enum SkillsError {
    #[error("keyword file {0} not found")]
    NotFound(String),

    #[error("failed to read keyword file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the keyword file at `path`. Never fails: a missing file yields the
/// built-in defaults, an unreadable one the short fallback list.
pub fn load_skills(path: &Path) -> SkillList {
    match read_skills_file(path) {
        Ok(skills) => {
            info!("Loaded {} skills from {}", skills.len(), path.display());
            SkillList::new(skills, SkillSource::File)
        }
        Err(e @ SkillsError::NotFound(_)) => {
            warn!("{e}; using default skills");
            SkillList::defaults()
        }
        Err(e) => {
            error!("{e}; using fallback skills");
            SkillList::fallback()
        }
    }
}

fn read_skills_file(path: &Path) -> Result<Vec<String>, SkillsError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(SkillsError::NotFound(display));
    }
    let content = std::fs::read_to_string(path).map_err(|source| SkillsError::Read {
        path: display,
        source,
    })?;
    Ok(parse_skills(&content))
}

/// One skill per line, trimmed and lowercased. Blank lines and `===` section
/// headers are skipped; remaining order is preserved.
pub fn parse_skills(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty() && !line.starts_with(SECTION_HEADER_MARKER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::DEFAULT_SKILLS;

    #[test]
    fn test_parse_skips_blank_and_header_lines() {
        let content = "=== LANGUAGES ===\nPython\n\n  SQL  \n=== FRONTEND ===\nReact\n";
        assert_eq!(parse_skills(content), vec!["python", "sql", "react"]);
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let content = "rust\ngo\nrust\n";
        assert_eq!(parse_skills(content), vec!["rust", "go", "rust"]);
    }

    #[test]
    fn test_parse_handles_crlf() {
        assert_eq!(parse_skills("Docker\r\nKubernetes\r\n"), vec!["docker", "kubernetes"]);
    }

    #[test]
    fn test_header_marker_only_skipped_at_line_start() {
        assert_eq!(parse_skills("c++ === c#\n"), vec!["c++ === c#"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.txt");
        std::fs::write(&path, "=== BACKEND ===\npython\nsql\nreact\n").unwrap();

        let list = load_skills(&path);
        assert_eq!(list.source(), SkillSource::File);
        assert_eq!(list.as_slice(), &["python", "sql", "react"]);
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let list = load_skills(&dir.path().join("absent.txt"));
        assert_eq!(list.source(), SkillSource::Default);
        assert_eq!(list.as_slice(), DEFAULT_SKILLS);
    }

    #[test]
    fn test_unreadable_file_returns_fallback() {
        // A directory exists but cannot be read as a file.
        let dir = tempfile::tempdir().unwrap();
        let list = load_skills(dir.path());
        assert_eq!(list.source(), SkillSource::Fallback);
        assert_eq!(list.as_slice(), &["python", "html", "css"]);
    }

    #[test]
    fn test_non_utf8_file_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        assert_eq!(load_skills(&path).source(), SkillSource::Fallback);
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.txt");
        std::fs::write(&path, "\n=== NOTHING ===\n").unwrap();
        let list = load_skills(&path);
        assert!(list.is_empty());
        assert_eq!(list.source(), SkillSource::File);
    }
}
