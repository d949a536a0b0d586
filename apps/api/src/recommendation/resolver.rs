//! Job Skill Resolver — finds a job by title and infers its required skills from the description.

use crate::models::catalog::Job;
use crate::recommendation::matcher::SkillMatcher;
use crate::recommendation::skills::SkillSet;

/// Case-insensitive, literal substring match of `title` against job titles.
///
/// Jobs are scanned in stored order and the first match wins; duplicate or
/// overlapping titles resolve to the earliest inserted row.
pub fn find_job<'a>(jobs: &'a [Job], title: &str) -> Option<&'a Job> {
    let needle = title.to_lowercase();
    jobs.iter()
        .find(|job| job.title.to_lowercase().contains(&needle))
}

/// Every vocabulary token the matcher finds in the (lower-cased) description.
///
/// Cost is O(vocabulary × description length); there is no index.
pub fn required_skills(
    description: Option<&str>,
    vocabulary: &SkillSet,
    matcher: &dyn SkillMatcher,
) -> SkillSet {
    let Some(description) = description else {
        return SkillSet::new();
    };
    let text = description.to_lowercase();

    vocabulary
        .iter()
        .filter(|skill| matcher.contains_skill(&text, skill))
        .cloned()
        .collect()
}
