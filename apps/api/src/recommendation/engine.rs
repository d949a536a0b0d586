//! Recommendation Engine — Extract → Resolve → Diff → Rank over one catalog snapshot.
//!
//! Pure and synchronous: the same snapshot and inputs always produce the same result.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::snapshot::{CatalogCourse, CatalogSnapshot};
use crate::recommendation::gap::{compute_gap, SkillGap};
use crate::recommendation::ranker::{rank_courses, RankedCourse};
use crate::recommendation::resolver::{find_job, required_skills};
use crate::recommendation::skills::{normalize_user_skills, SkillSet};

pub const NO_GAP_MESSAGE: &str = "User already has all job-required skills!";
pub const NO_RECOMMENDATIONS_MESSAGE: &str =
    "No course in the catalog covers any of the missing skills.";

/// The only failure the caller must branch on. Data-quality issues never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("Job not found: {0}")]
    JobNotFound(String),
}

/// Successful recommendation outcomes, tagged by `status` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Recommended {
        job_title: String,
        matched_job_title: String,
        missing_skills: Vec<String>,
        recommended_courses: Vec<RankedCourse>, // ≤ MAX_RECOMMENDATIONS
    },
    NoGap {
        job_title: String,
        matched_job_title: String,
        missing_skills: Vec<String>, // always empty
        message: String,
    },
    NoRecommendations {
        job_title: String,
        matched_job_title: String,
        missing_skills: Vec<String>,
        message: String,
    },
}

/// Recommends courses that close the gap between a job's inferred skills and the user's.
pub fn recommend<S: AsRef<str>>(
    snapshot: &CatalogSnapshot,
    job_title: &str,
    user_skills: &[S],
) -> Result<Recommendation, RecommendError> {
    let user = normalize_user_skills(user_skills);

    let job = find_job(snapshot.jobs(), job_title)
        .ok_or_else(|| RecommendError::JobNotFound(job_title.to_string()))?;

    let required = required_skills(
        job.description.as_deref(),
        snapshot.vocabulary(),
        snapshot.matcher(),
    );

    let missing = match compute_gap(&required, &user) {
        SkillGap::NoGap => {
            debug!(
                "'{}' -> '{}': {} required skills, no gap",
                job_title,
                job.title,
                required.len()
            );
            return Ok(Recommendation::NoGap {
                job_title: job_title.to_string(),
                matched_job_title: job.title.clone(),
                missing_skills: Vec::new(),
                message: NO_GAP_MESSAGE.to_string(),
            });
        }
        SkillGap::Missing(missing) => missing,
    };

    debug!(
        "'{}' -> '{}': {} required, {} missing",
        job_title,
        job.title,
        required.len(),
        missing.len()
    );

    Ok(recommend_for_gap(
        job_title,
        &job.title,
        missing,
        snapshot.courses(),
    ))
}

/// Ranks `courses` against a non-empty gap and picks the outcome.
///
/// Against a consistent snapshot every missing skill comes from some course, so
/// `NoRecommendations` only appears when the course list differs from the vocabulary source.
fn recommend_for_gap(
    job_title: &str,
    matched_job_title: &str,
    missing: SkillSet,
    courses: &[CatalogCourse],
) -> Recommendation {
    let ranked = rank_courses(&missing, courses);
    let missing_skills: Vec<String> = missing.into_iter().collect();

    if ranked.is_empty() {
        return Recommendation::NoRecommendations {
            job_title: job_title.to_string(),
            matched_job_title: matched_job_title.to_string(),
            missing_skills,
            message: NO_RECOMMENDATIONS_MESSAGE.to_string(),
        };
    }

    Recommendation::Recommended {
        job_title: job_title.to_string(),
        matched_job_title: matched_job_title.to_string(),
        missing_skills,
        recommended_courses: ranked,
    }
}
