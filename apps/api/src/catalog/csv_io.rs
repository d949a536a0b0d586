//! CSV import (seed files) and export (job table backups).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::catalog::repository;
use crate::models::catalog::{parse_enrollment, parse_rating, NewCourse, NewJob};

pub const JOBS_SEED_FILE: &str = "jobs.csv";
pub const COURSES_SEED_FILE: &str = "courses.csv";

/// Course seed row. Numeric columns stay text so a stray "N/A" degrades instead of aborting the import.
#[derive(Debug, Deserialize)]
struct CourseCsvRecord {
    course_title: String,
    organization: Option<String>,
    skills: Option<String>,
    url: Option<String>,
    rating: Option<String>,
    course_students_enrolled: Option<String>,
}

impl From<CourseCsvRecord> for NewCourse {
    fn from(record: CourseCsvRecord) -> Self {
        NewCourse {
            course_title: record.course_title,
            organization: record.organization,
            skills: record.skills,
            url: record.url,
            rating: parse_rating(record.rating.as_deref()),
            course_students_enrolled: parse_enrollment(record.course_students_enrolled.as_deref())
                .and_then(|n| i64::try_from(n).ok()),
        }
    }
}

/// Reads `job_title,company,description` rows. Blank cells become `None`.
pub fn import_jobs_csv(path: &Path) -> Result<Vec<NewJob>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open jobs CSV {}", path.display()))?;

    let mut jobs = Vec::new();
    for record in reader.deserialize::<NewJob>() {
        jobs.push(record.with_context(|| format!("Malformed row in {}", path.display()))?);
    }
    Ok(jobs)
}

/// Reads `course_title,organization,skills,url,rating,course_students_enrolled` rows.
pub fn import_courses_csv(path: &Path) -> Result<Vec<NewCourse>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open courses CSV {}", path.display()))?;

    let mut courses = Vec::new();
    for record in reader.deserialize::<CourseCsvRecord>() {
        let record = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        courses.push(NewCourse::from(record));
    }
    Ok(courses)
}

/// Writes every job row (with a header) to `path` and returns the row count.
pub async fn export_jobs_csv(pool: &SqlitePool, path: &Path) -> Result<usize> {
    let rows = repository::fetch_all_job_rows(pool).await?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create backup file {}", path.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Backup saved: {} ({} jobs)", path.display(), rows.len());
    Ok(rows.len())
}

/// Imports `jobs.csv` / `courses.csv` from `dir` into tables that are still empty.
///
/// Returns `(jobs_saved, courses_saved)`. Missing files are skipped.
pub async fn seed_from_dir(pool: &SqlitePool, dir: &Path) -> Result<(u64, u64)> {
    let mut jobs_saved = 0;
    let mut courses_saved = 0;

    let jobs_path = dir.join(JOBS_SEED_FILE);
    if jobs_path.exists() && repository::count_jobs(pool).await? == 0 {
        let jobs = import_jobs_csv(&jobs_path)?;
        jobs_saved = repository::save_jobs(pool, &jobs).await?;
    }

    let courses_path = dir.join(COURSES_SEED_FILE);
    if courses_path.exists() && repository::count_courses(pool).await? == 0 {
        let courses = import_courses_csv(&courses_path)?;
        courses_saved = repository::save_courses(pool, &courses).await?;
    }

    info!(
        "Seeded catalog from {}: {jobs_saved} jobs, {courses_saved} courses",
        dir.display()
    );
    Ok((jobs_saved, courses_saved))
}
