use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Domain records handed to the recommendation engine
// ────────────────────────────────────────────────────────────────────────────

/// A job posting. Stored order is significant: title lookups take the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub description: Option<String>,
}

/// A catalog course. `rating` and `enrollment` are `None` when absent or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub organization: Option<String>,
    pub skills: Option<String>,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub enrollment: Option<u64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Database rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub job_title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            title: row.job_title,
            description: row.description,
        }
    }
}

/// Course row with `rating` and enrollment selected as text so stray values never fail decoding.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub course_title: String,
    pub organization: Option<String>,
    pub skills: Option<String>,
    pub url: Option<String>,
    pub rating: Option<String>,
    pub course_students_enrolled: Option<String>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        let rating = parse_rating(row.rating.as_deref());
        let enrollment = parse_enrollment(row.course_students_enrolled.as_deref());
        Course {
            title: row.course_title,
            organization: row.organization,
            skills: row.skills,
            url: row.url,
            rating,
            enrollment,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inserts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub job_title: String,
    pub company: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub course_title: String,
    pub organization: Option<String>,
    pub skills: Option<String>,
    pub url: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub course_students_enrolled: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient parsing of degraded fields
// ────────────────────────────────────────────────────────────────────────────

/// Parses a stored rating. Blank, `nan`, non-finite or garbage values become `None`.
pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!("Unparseable course rating '{raw}', treating as absent");
            None
        }
    }
}

/// Parses an enrollment count such as `"12,345"` or `"3.0"`. Anything else becomes `None`.
pub fn parse_enrollment(raw: Option<&str>) -> Option<u64> {
    let cleaned = raw?.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.trunc() as u64),
        _ => {
            debug!("Unparseable enrollment count '{cleaned}', treating as absent");
            None
        }
    }
}
