//! Course Ranker — scores catalog courses by how much of the skill gap they cover.
//!
//! Algorithm:
//! 1. matched = missing ∩ course_skills; courses with no overlap are dropped
//! 2. coverage_score = |matched| / |missing|
//! 3. Stable sort: coverage desc, then rating desc (absent rating lowest), then scan order
//! 4. Keep the first `MAX_RECOMMENDATIONS`

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::snapshot::CatalogCourse;
use crate::recommendation::skills::SkillSet;

pub const MAX_RECOMMENDATIONS: usize = 5;

/// A course recommended to close part of a skill gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCourse {
    pub course_title: String,
    pub organization: Option<String>,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub coverage_score: f64, // (0.0, 1.0]
    pub matched_skills: Vec<String>,
}

/// Ranks `courses` against a non-empty `missing` set.
///
/// An empty `missing` set yields no candidates rather than dividing by zero.
pub fn rank_courses(missing: &SkillSet, courses: &[CatalogCourse]) -> Vec<RankedCourse> {
    if missing.is_empty() {
        return Vec::new();
    }
    let total = missing.len() as f64;

    let mut candidates: Vec<RankedCourse> = courses
        .iter()
        .filter_map(|entry| {
            let matched: Vec<String> = missing.intersection(&entry.skills).cloned().collect();
            if matched.is_empty() {
                return None;
            }
            Some(RankedCourse {
                course_title: entry.course.title.clone(),
                organization: entry.course.organization.clone(),
                url: entry.course.url.clone(),
                rating: entry.course.rating,
                coverage_score: matched.len() as f64 / total,
                matched_skills: matched,
            })
        })
        .collect();

    // sort_by is stable: full ties keep catalog order
    candidates.sort_by(|a, b| {
        b.coverage_score
            .total_cmp(&a.coverage_score)
            .then_with(|| compare_ratings(b.rating, a.rating))
    });
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

/// Ascending rating order where an absent rating is below every number, zero included.
fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
