use crate::recommendation::skills::SkillSet;

/// Outcome of subtracting a user's skills from a job's required skills.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillGap {
    /// The user already has every required skill.
    NoGap,
    /// Skills still missing. Never empty.
    Missing(SkillSet),
}

/// `required − user`. Both sets are expected to be normalized already.
pub fn compute_gap(required: &SkillSet, user: &SkillSet) -> SkillGap {
    let missing: SkillSet = required.difference(user).cloned().collect();
    if missing.is_empty() {
        SkillGap::NoGap
    } else {
        SkillGap::Missing(missing)
    }
}
