//! Skill Extractor — turns free-text, comma-separated skill fields into normalized token sets.

use std::collections::BTreeSet;

/// Ordered set of normalized skill tokens. Ordered so that every derived output is deterministic.
pub type SkillSet = BTreeSet<String>;

/// Splits a skill field on commas, trims and lower-cases each piece, and drops empty pieces.
///
/// A missing field yields the empty set. Tokens are not otherwise validated, so
/// single-character pieces such as `"r"` or `"c"` are kept.
pub fn extract_skills(text: Option<&str>) -> SkillSet {
    let Some(text) = text else {
        return SkillSet::new();
    };

    text.split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Normalizes the skills a user declares so they compare equal to extracted tokens.
pub fn normalize_user_skills<S: AsRef<str>>(skills: &[S]) -> SkillSet {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_empty_set() {
        assert!(extract_skills(None).is_empty());
    }

    #[test]
    fn test_empty_and_blank_fields_are_empty_set() {
        assert!(extract_skills(Some("")).is_empty());
        assert!(extract_skills(Some("  ,  , ")).is_empty());
    }

    #[test]
    fn test_splits_trims_and_lowercases() {
        let skills = extract_skills(Some(" Python,SQL ,  Data Analysis"));
        let expected: SkillSet = ["python", "sql", "data analysis"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_duplicates_collapse() {
        let skills = extract_skills(Some("python, Python, PYTHON "));
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("python"));
    }

    #[test]
    fn test_single_character_tokens_are_kept() {
        let skills = extract_skills(Some("r, c, go"));
        assert!(skills.contains("r"));
        assert!(skills.contains("c"));
        assert_eq!(skills.len(), 3);
    }

    #[test]
    fn test_user_skills_normalized() {
        let user = normalize_user_skills(&["  Python", "SQL", ""]);
        assert_eq!(user.len(), 2);
        assert!(user.contains("python"));
        assert!(user.contains("sql"));
    }
}
