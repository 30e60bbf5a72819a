//! Case-insensitive substring scoring of résumé text against a skill list.

use serde::Serialize;

/// Partition of a skill list against one text, plus the percentage found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// 100 × found / total, unrounded. 0 for the degenerate cases.
    pub score: f64,
    /// Skills present in the text, in skill-list order.
    pub found: Vec<String>,
    /// Skills absent from the text, in skill-list order.
    pub missing: Vec<String>,
}

impl MatchResult {
    fn empty() -> Self {
        Self {
            score: 0.0,
            found: vec![],
            missing: vec![],
        }
    }

    /// Score rounded to one decimal place for display.
    pub fn display_score(&self) -> f64 {
        round_one_decimal(self.score)
    }

    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_score(self.score)
    }
}

/// Coarse rating shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    Excellent,
    Good,
    Moderate,
    Weak,
}

impl MatchQuality {
    /// excellent ≥ 80, good ≥ 60, moderate ≥ 40, otherwise weak.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchQuality::Excellent
        } else if score >= 60.0 {
            MatchQuality::Good
        } else if score >= 40.0 {
            MatchQuality::Moderate
        } else {
            MatchQuality::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Excellent => "EXCELLENT MATCH",
            MatchQuality::Good => "GOOD MATCH",
            MatchQuality::Moderate => "MODERATE MATCH",
            MatchQuality::Weak => "WEAK MATCH",
        }
    }

    pub fn headline(&self, score: f64) -> String {
        format!("{} ({score:.1}%)", self.label())
    }
}

/// Scores `text` against `skills`.
///
/// A skill is found when its lowercase form occurs anywhere in the lowercased
/// text. No tokenizing and no word boundaries. Empty text or an empty skill
/// list yields a zero score with both lists empty.
pub fn match_skills(text: &str, skills: &[String]) -> MatchResult {
    if text.is_empty() || skills.is_empty() {
        return MatchResult::empty();
    }

    let haystack = text.to_lowercase();
    let (found, missing): (Vec<String>, Vec<String>) = skills
        .iter()
        .cloned()
        .partition(|skill| haystack.contains(&skill.to_lowercase()));

    let score = found.len() as f64 / skills.len() as f64 * 100.0;

    MatchResult {
        score,
        found,
        missing,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
