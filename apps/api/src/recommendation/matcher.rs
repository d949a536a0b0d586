//! Skill Matcher — pluggable, trait-based test for "does this text mention this skill token".
//!
//! Default: `WordBoundaryMatcher` (regex `(?:^|\W)<token>(?:\W|$)`, compiled once per catalog snapshot).
//! Alternative: `SubstringMatcher` (plain `str::contains`, looser).
//!
//! The catalog snapshot owns an `Arc<dyn SkillMatcher>` built from `MatcherKind`, chosen via config.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recommendation::skills::SkillSet;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap the matching heuristic without touching resolver or ranking code.
///
/// `text` is expected to be lower-cased already; `skill` is a normalized skill token.
pub trait SkillMatcher: Send + Sync {
    fn contains_skill(&self, text: &str, skill: &str) -> bool;

    /// Short label for logs and catalog stats.
    fn name(&self) -> &'static str;
}

/// Which matcher a catalog snapshot should build. Parsed from `SKILL_MATCHER`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    #[default]
    WordBoundary,
    Substring,
}

impl MatcherKind {
    /// Builds the matcher for a given vocabulary.
    pub fn build(self, vocabulary: &SkillSet) -> Arc<dyn SkillMatcher> {
        match self {
            MatcherKind::WordBoundary => Arc::new(WordBoundaryMatcher::with_vocabulary(vocabulary)),
            MatcherKind::Substring => Arc::new(SubstringMatcher),
        }
    }
}

impl FromStr for MatcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word_boundary" | "word-boundary" => Ok(MatcherKind::WordBoundary),
            "substring" => Ok(MatcherKind::Substring),
            other => Err(format!(
                "unknown skill matcher '{other}' (expected 'word_boundary' or 'substring')"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WordBoundaryMatcher — default
// ────────────────────────────────────────────────────────────────────────────

/// Matches a token only where it is not adjacent to another word character.
///
/// `"java"` does not match inside `"javascript"`, but `"data"` still matches
/// inside the phrase `"big data analysis"`; overlapping tokens are not deduplicated.
/// The boundary is checked against the neighbouring characters rather than with `\b`,
/// so tokens that start or end in punctuation (`c++`, `c#`, `.net`) behave the same way.
#[derive(Debug, Default)]
pub struct WordBoundaryMatcher {
    compiled: HashMap<String, Regex>,
}

impl WordBoundaryMatcher {
    /// Pre-compiles one pattern per vocabulary token.
    pub fn with_vocabulary(vocabulary: &SkillSet) -> Self {
        let compiled = vocabulary
            .iter()
            .filter_map(|skill| compile_boundary_pattern(skill).map(|re| (skill.clone(), re)))
            .collect();
        Self { compiled }
    }
}

impl SkillMatcher for WordBoundaryMatcher {
    fn contains_skill(&self, text: &str, skill: &str) -> bool {
        if let Some(re) = self.compiled.get(skill) {
            return re.is_match(text);
        }
        // Token outside the pre-compiled vocabulary
        compile_boundary_pattern(skill)
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "word_boundary"
    }
}

fn compile_boundary_pattern(skill: &str) -> Option<Regex> {
    // regex has no lookaround; consuming a neighbouring non-word char is enough for is_match
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(skill));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping skill token '{skill}': pattern did not compile: {e}");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SubstringMatcher — alternative
// ────────────────────────────────────────────────────────────────────────────

/// Plain substring test. Faster to build, but `"r"` matches almost any description.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl SkillMatcher for SubstringMatcher {
    fn contains_skill(&self, text: &str, skill: &str) -> bool {
        !skill.is_empty() && text.contains(skill)
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_boundary_rejects_partial_word() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["java"]));
        assert!(!m.contains_skill("experience with javascript", "java"));
        assert!(m.contains_skill("experience with java and spring", "java"));
    }

    #[test]
    fn test_word_boundary_matches_at_punctuation() {
        let m = WordBoundaryMatcher::default();
        assert!(m.contains_skill("required: python, sql.", "sql"));
        assert!(m.contains_skill("(python)", "python"));
    }

    #[test]
    fn test_word_boundary_matches_multi_word_token() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["machine learning"]));
        assert!(m.contains_skill("apply machine learning to pricing", "machine learning"));
        assert!(!m.contains_skill("machine-learned models", "machine learning"));
    }

    #[test]
    fn test_word_boundary_escapes_regex_metacharacters() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["node.js"]));
        assert!(m.contains_skill("we use node.js daily", "node.js"));
        assert!(!m.contains_skill("we use nodexjs daily", "node.js"));
    }

    #[test]
    fn test_word_boundary_handles_punctuated_tokens() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["c++", "c#", ".net"]));
        assert!(m.contains_skill("need c++ skills", "c++"));
        assert!(m.contains_skill("c++", "c++"));
        assert!(!m.contains_skill("c++x", "c++"));
        assert!(m.contains_skill("c# and sql", "c#"));
        assert!(!m.contains_skill("c#x", "c#"));
        assert!(m.contains_skill("uses .net core", ".net"));
        assert!(!m.contains_skill("asp.net", ".net"));
    }

    #[test]
    fn test_word_boundary_matches_at_text_edges() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["sql"]));
        assert!(m.contains_skill("sql", "sql"));
        assert!(m.contains_skill("sql first", "sql"));
        assert!(m.contains_skill("ends with sql", "sql"));
        assert!(!m.contains_skill("mysql", "sql"));
    }

    #[test]
    fn test_word_boundary_falls_back_for_unknown_token() {
        let m = WordBoundaryMatcher::with_vocabulary(&vocab(&["python"]));
        assert!(m.contains_skill("strong excel skills", "excel"));
    }

    #[test]
    fn test_substring_matches_inside_words() {
        let m = SubstringMatcher;
        assert!(m.contains_skill("experience with javascript", "java"));
        assert!(!m.contains_skill("anything", ""));
    }

    #[test]
    fn test_matcher_kind_from_str() {
        assert_eq!("word_boundary".parse::<MatcherKind>(), Ok(MatcherKind::WordBoundary));
        assert_eq!(" Substring ".parse::<MatcherKind>(), Ok(MatcherKind::Substring));
        assert!("fuzzy".parse::<MatcherKind>().is_err());
    }

    #[test]
    fn test_matcher_kind_default_is_word_boundary() {
        assert_eq!(MatcherKind::default(), MatcherKind::WordBoundary);
        assert_eq!(MatcherKind::default().build(&SkillSet::new()).name(), "word_boundary");
    }
}
