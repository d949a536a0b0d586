//! Catalog Snapshot — immutable, explicitly passed context for the recommendation engine.
//!
//! A snapshot holds the job table, every course with its pre-extracted skill set,
//! the global skill vocabulary and the matcher compiled for that vocabulary.
//! Reloading builds a fresh snapshot and swaps the `Arc`; snapshots are never mutated.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::catalog::source::CatalogSource;
use crate::models::catalog::{Course, Job};
use crate::recommendation::matcher::{MatcherKind, SkillMatcher};
use crate::recommendation::skills::{extract_skills, SkillSet};

/// A course paired with the skill tokens extracted from its `skills` field.
#[derive(Debug, Clone)]
pub struct CatalogCourse {
    pub course: Course,
    pub skills: SkillSet,
}

pub struct CatalogSnapshot {
    jobs: Vec<Job>,
    courses: Vec<CatalogCourse>,
    vocabulary: SkillSet,
    matcher: Arc<dyn SkillMatcher>,
    loaded_at: DateTime<Utc>,
}

impl std::fmt::Debug for CatalogSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSnapshot")
            .field("jobs", &self.jobs)
            .field("courses", &self.courses)
            .field("vocabulary", &self.vocabulary)
            .field("matcher", &self.matcher.name())
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

/// Summary returned by the catalog endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub job_count: usize,
    pub course_count: usize,
    pub vocabulary_size: usize,
    pub matcher: String,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Derives per-course skill sets and the vocabulary (union of all course skills).
    pub fn build(jobs: Vec<Job>, courses: Vec<Course>, matcher_kind: MatcherKind) -> Self {
        let courses: Vec<CatalogCourse> = courses
            .into_iter()
            .map(|course| {
                let skills = extract_skills(course.skills.as_deref());
                CatalogCourse { course, skills }
            })
            .collect();

        let vocabulary: SkillSet = courses
            .iter()
            .flat_map(|c| c.skills.iter().cloned())
            .collect();

        let matcher = matcher_kind.build(&vocabulary);

        Self {
            jobs,
            courses,
            vocabulary,
            matcher,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty(matcher_kind: MatcherKind) -> Self {
        Self::build(Vec::new(), Vec::new(), matcher_kind)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn courses(&self) -> &[CatalogCourse] {
        &self.courses
    }

    pub fn vocabulary(&self) -> &SkillSet {
        &self.vocabulary
    }

    pub fn matcher(&self) -> &dyn SkillMatcher {
        self.matcher.as_ref()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            job_count: self.jobs.len(),
            course_count: self.courses.len(),
            vocabulary_size: self.vocabulary.len(),
            matcher: self.matcher.name().to_string(),
            loaded_at: self.loaded_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CatalogHandle — rebuild-then-swap
// ────────────────────────────────────────────────────────────────────────────

/// Shared pointer to the current snapshot.
///
/// Readers clone the inner `Arc` and release the lock immediately. Reloads are
/// serialized by `reload_lock`; the write lock is held only for the pointer swap.
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogSnapshot>>,
    reload_lock: Mutex<()>,
    matcher_kind: MatcherKind,
}

impl CatalogHandle {
    pub fn new(snapshot: CatalogSnapshot, matcher_kind: MatcherKind) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            reload_lock: Mutex::new(()),
            matcher_kind,
        }
    }

    pub async fn current(&self) -> Arc<CatalogSnapshot> {
        self.current.read().await.clone()
    }

    /// Fetches both tables, builds a new snapshot, and swaps it in.
    /// On a fetch error the previous snapshot stays current.
    pub async fn reload(&self, source: &dyn CatalogSource) -> Result<Arc<CatalogSnapshot>> {
        let _guard = self.reload_lock.lock().await;

        let jobs = source.fetch_jobs().await?;
        let courses = source.fetch_courses().await?;
        let snapshot = Arc::new(CatalogSnapshot::build(jobs, courses, self.matcher_kind));

        let stats = snapshot.stats();
        info!(
            "Catalog snapshot built: {} jobs, {} courses, {} vocabulary tokens ({} matcher)",
            stats.job_count, stats.course_count, stats.vocabulary_size, stats.matcher
        );

        *self.current.write().await = snapshot.clone();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::{FailingCatalogSource, StaticCatalogSource};

    fn course(title: &str, skills: Option<&str>) -> Course {
        Course {
            title: title.to_string(),
            organization: None,
            skills: skills.map(str::to_string),
            url: None,
            rating: None,
            enrollment: None,
        }
    }

    fn job(title: &str, description: &str) -> Job {
        Job {
            title: title.to_string(),
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn test_vocabulary_is_union_of_course_skills() {
        let snapshot = CatalogSnapshot::build(
            vec![],
            vec![
                course("A", Some("Python, SQL")),
                course("B", Some("sql, Tableau")),
                course("C", None),
            ],
            MatcherKind::WordBoundary,
        );
        let expected: SkillSet = ["python", "sql", "tableau"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(snapshot.vocabulary(), &expected);
        assert!(snapshot.courses()[2].skills.is_empty());
    }

    #[test]
    fn test_stats_reflect_tables() {
        let snapshot = CatalogSnapshot::build(
            vec![job("Data Analyst", "sql")],
            vec![course("A", Some("python, sql"))],
            MatcherKind::Substring,
        );
        let stats = snapshot.stats();
        assert_eq!(stats.job_count, 1);
        assert_eq!(stats.course_count, 1);
        assert_eq!(stats.vocabulary_size, 2);
        assert_eq!(stats.matcher, "substring");
    }

    #[tokio::test]
    async fn test_reload_swaps_snapshot_and_keeps_old_for_holders() {
        let handle = CatalogHandle::new(
            CatalogSnapshot::empty(MatcherKind::WordBoundary),
            MatcherKind::WordBoundary,
        );
        let before = handle.current().await;
        assert!(before.jobs().is_empty());

        let source = StaticCatalogSource {
            jobs: vec![job("Data Analyst", "python and sql")],
            courses: vec![course("SQL 101", Some("sql"))],
        };
        handle.reload(&source).await.unwrap();

        let after = handle.current().await;
        assert_eq!(after.jobs().len(), 1);
        assert_eq!(after.vocabulary().len(), 1);
        // Earlier readers still see their own snapshot
        assert!(before.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let handle = CatalogHandle::new(
            CatalogSnapshot::empty(MatcherKind::WordBoundary),
            MatcherKind::WordBoundary,
        );
        let source = StaticCatalogSource {
            jobs: vec![job("Data Analyst", "python and sql")],
            courses: vec![course("SQL 101", Some("sql")), course("Py 101", Some("python"))],
        };
        handle.reload(&source).await.unwrap();
        let before = handle.current().await;

        let failing = FailingCatalogSource {
            jobs: vec![job("Data Analyst", "sql"), job("DevOps Engineer", "kubernetes")],
        };
        let err = handle.reload(&failing).await.unwrap_err();
        assert!(err.to_string().contains("courses table unavailable"));

        let after = handle.current().await;
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.stats().job_count, 1);
        assert_eq!(after.stats().course_count, 2);
        assert_eq!(after.vocabulary().len(), 2);
    }
}
