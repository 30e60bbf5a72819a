//! Downloadable artifacts and text summaries for one analysis.

use serde::Serialize;

use crate::scoring::matcher::MatchResult;

pub const PREVIEW_CHARS: usize = 2000;
const TRUNCATION_MARKER: &str = "... [truncated]";

/// A plain-text file offered for download.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub file_name: String,
    pub content: String,
}

/// Size figures for extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    /// Newline count plus one.
    pub lines: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: text.matches('\n').count() + 1,
        }
    }
}

/// First `PREVIEW_CHARS` characters, marked when cut.
pub fn text_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Upload name with every `.pdf` occurrence removed.
pub fn artifact_stem(file_name: &str) -> String {
    file_name.replace(".pdf", "")
}

pub fn analysis_report(file_name: &str, result: &MatchResult, total_skills: usize) -> Artifact {
    let mut content = String::from("RESUME ANALYSIS REPORT\n");
    content.push_str(&format!("File: {file_name}\n"));
    content.push_str(&format!("Match Score: {:.1}%\n", result.score));
    content.push_str(&format!(
        "Skills Found: {}/{}\n\n",
        result.found.len(),
        total_skills
    ));

    content.push_str("FOUND SKILLS:\n");
    for skill in sorted(&result.found) {
        content.push_str(&format!("✓ {skill}\n"));
    }
    content.push_str("\nMISSING SKILLS:\n");
    for skill in sorted(&result.missing) {
        content.push_str(&format!("✗ {skill}\n"));
    }

    Artifact {
        file_name: format!("{}_analysis.txt", artifact_stem(file_name)),
        content,
    }
}

pub fn extracted_text_artifact(file_name: &str, text: &str) -> Artifact {
    Artifact {
        file_name: format!("{}_extracted.txt", artifact_stem(file_name)),
        content: text.to_string(),
    }
}

fn sorted(skills: &[String]) -> Vec<&String> {
    let mut out: Vec<&String> = skills.iter().collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::matcher::match_skills;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report_layout() {
        let list = skills(&["sql", "react", "python"]);
        let result = match_skills("experienced in python and sql development.", &list);
        let report = analysis_report("jane_doe.pdf", &result, list.len());

        assert_eq!(report.file_name, "jane_doe_analysis.txt");
        assert_eq!(
            report.content,
            "RESUME ANALYSIS REPORT\n\
             File: jane_doe.pdf\n\
             Match Score: 66.7%\n\
             Skills Found: 2/3\n\
             \n\
             FOUND SKILLS:\n\
             ✓ python\n\
             ✓ sql\n\
             \n\
             MISSING SKILLS:\n\
             ✗ react\n"
        );
    }

    #[test]
    fn test_report_with_nothing_missing() {
        let list = skills(&["rust"]);
        let result = match_skills("rust", &list);
        let report = analysis_report("cv.pdf", &result, 1);
        assert!(report.content.ends_with("MISSING SKILLS:\n"));
        assert!(report.content.contains("Match Score: 100.0%"));
    }

    #[test]
    fn test_extracted_text_artifact_name() {
        let artifact = extracted_text_artifact("resume.final.pdf", "hello");
        assert_eq!(artifact.file_name, "resume.final_extracted.txt");
        assert_eq!(artifact.content, "hello");
    }

    #[test]
    fn test_stem_without_pdf_suffix_is_unchanged() {
        assert_eq!(artifact_stem("resume.PDF"), "resume.PDF");
    }

    #[test]
    fn test_text_stats() {
        let stats = TextStats::of("one two\nthree\n");
        assert_eq!(
            stats,
            TextStats {
                characters: 14,
                words: 3,
                lines: 3
            }
        );
    }

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(text_preview("short"), "short");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(PREVIEW_CHARS + 5);
        let preview = text_preview(&text);
        assert!(preview.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            preview.trim_end_matches(TRUNCATION_MARKER).chars().count(),
            PREVIEW_CHARS
        );
    }

    #[test]
    fn test_preview_exact_length_not_marked() {
        let text = "x".repeat(PREVIEW_CHARS);
        assert_eq!(text_preview(&text), text);
    }
}
