//! Requirement-group scoring against the final taken set

use super::aliases::TakenSet;
use super::report::RequirementProgress;
use crate::core::models::RequirementGroup;
use std::collections::{BTreeMap, HashSet};

/// Score one requirement group.
///
/// Required courses count individually; choose-N options count once per
/// distinct course (cross-listed codes are one course), capped at N. A group needing nothing is satisfied.
#[must_use]
pub fn score(requirement: &RequirementGroup, taken: &TakenSet<'_>) -> RequirementProgress {
    let total = requirement.total_required();
    if total == 0 {
        return RequirementProgress {
            satisfied: true,
            progress: 100,
            completed: 0,
            total: 0,
        };
    }

    let required_done = requirement
        .courses_required
        .iter()
        .filter(|code| taken.contains(code))
        .count();

    let chosen_done = requirement.choose_from.as_ref().map_or(0, |choose| {
        let mut distinct = HashSet::new();
        let taken_options = choose
            .options
            .iter()
            .filter(|code| distinct.insert(taken.aliases().expand(code)))
            .filter(|code| taken.contains(code))
            .count();
        taken_options.min(choose.count)
    });

    let completed = required_done + chosen_done;
    RequirementProgress {
        satisfied: completed >= total,
        progress: percent(completed, total),
        completed,
        total,
    }
}

/// Score every requirement, keyed by name
#[must_use]
pub fn score_all(
    requirements: &[RequirementGroup],
    taken: &TakenSet<'_>,
) -> BTreeMap<String, RequirementProgress> {
    requirements
        .iter()
        .map(|req| (req.name.clone(), score(req, taken)))
        .collect()
}

/// Whole percent, rounded down so 100 only ever means complete
fn percent(completed: usize, total: usize) -> u32 {
    let value = completed.min(total) * 100 / total;
    u32::try_from(value).unwrap_or(100)
}
