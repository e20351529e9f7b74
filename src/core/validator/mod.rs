//! Plan validation
//!
//! Walks a plan's quarters in chronological order, carrying the set of
//! courses taken so far, and collects findings into a [`ValidationReport`].
//! Quarter `K` only ever sees courses from quarters strictly before it.

pub mod aliases;
pub mod report;
pub mod requirements;

pub use aliases::{AliasMap, TakenSet};
pub use report::{
    MessageCode, MessageLevel, ReportMetadata, RequirementProgress, ValidationMessage,
    ValidationReport,
};

use crate::core::error::PlanResult;
use crate::core::models::{
    canonical_code, Catalog, PlanSettings, PlannedCourse, Quarter, RequirementGroup, Season, Term,
    UserPlan,
};
use crate::{debug, info};
use std::collections::{HashMap, HashSet};

/// Read-only inputs shared by every quarter of a sweep
struct SweepContext<'a> {
    catalog: &'a Catalog,
    aliases: &'a AliasMap,
    completed: &'a TakenSet<'a>,
    settings: &'a PlanSettings,
}

/// State threaded forward through the sweep; owned by [`validate`]
struct SweepState<'a> {
    taken: TakenSet<'a>,
    seen: HashSet<String>,
    report: ValidationReport,
    courses_checked: usize,
}

/// Validate a plan against a catalog and a set of requirements.
///
/// # Arguments
/// * `catalog` - Course catalog; the only source of units, offerings, and requisites
/// * `requirements` - Requirement groups to score against the final taken set
/// * `plan` - The plan to check
/// * `settings` - Unit ceiling and summer policy for this run
///
/// # Returns
/// A fresh report. Identical inputs produce identical reports.
///
/// # Errors
/// Returns [`PlanError::InvalidQuarterName`](crate::core::error::PlanError::InvalidQuarterName)
/// if any quarter name is not in `Season-Year` form. Every other problem is
/// reported as a message inside the report.
pub fn validate(
    catalog: &Catalog,
    requirements: &[RequirementGroup],
    plan: &UserPlan,
    settings: &PlanSettings,
) -> PlanResult<ValidationReport> {
    let quarters = chronological(&plan.quarters)?;

    let aliases = AliasMap::from_catalog(catalog);
    let mut completed = TakenSet::new(&aliases);
    for course in &plan.completed_courses {
        completed.insert(&course.code);
    }

    let ctx = SweepContext {
        catalog,
        aliases: &aliases,
        completed: &completed,
        settings,
    };
    let mut state = SweepState {
        taken: completed.clone(),
        seen: HashSet::new(),
        report: ValidationReport::default(),
        courses_checked: 0,
    };

    for (term, quarter) in &quarters {
        check_quarter(&ctx, &mut state, *term, quarter);
    }

    let mut report = state.report;
    report.requirements = requirements::score_all(requirements, &state.taken);
    report.metadata = ReportMetadata {
        engine_version: crate::core::get_version().to_string(),
        quarters_checked: quarters.len(),
        courses_checked: state.courses_checked,
        ..ReportMetadata::default()
    };
    report.refresh_counts();

    info!(
        "Validated {} quarter(s): {} error(s), {} warning(s)",
        report.metadata.quarters_checked,
        report.metadata.error_count,
        report.metadata.warning_count
    );

    Ok(report)
}

/// Parse every quarter name and order the quarters chronologically.
///
/// Quarters naming the same term keep their plan order.
fn chronological(quarters: &[Quarter]) -> PlanResult<Vec<(Term, &Quarter)>> {
    let mut ordered = quarters
        .iter()
        .map(|q| q.term().map(|term| (term, q)))
        .collect::<PlanResult<Vec<_>>>()?;
    ordered.sort_by_key(|(term, _)| *term);
    Ok(ordered)
}

fn check_quarter(ctx: &SweepContext<'_>, state: &mut SweepState<'_>, term: Term, quarter: &Quarter) {
    let name = quarter.name.as_str();
    debug!(
        "Checking {name}: {} course(s), {} taken before",
        quarter.courses.len(),
        state.taken.len()
    );
    state.courses_checked += quarter.courses.len();

    check_unit_load(ctx, state, quarter);

    if !ctx.settings.include_summer && term.season == Season::Summer && !quarter.courses.is_empty() {
        state.report.push_plan(
            ValidationMessage::new(
                MessageCode::SummerNotIncluded,
                format!("{name} is a summer quarter but summers are excluded from this plan"),
            )
            .in_quarter(name),
        );
    }

    let distinct = distinct_courses(ctx, state, quarter);

    let scheduled_here: HashSet<String> = distinct
        .iter()
        .flat_map(|course| ctx.aliases.expand(&course.code))
        .collect();

    for planned in &distinct {
        check_course(ctx, state, term, name, planned, &scheduled_here);
    }

    for planned in &distinct {
        state.seen.insert(planned.key());
        state.taken.insert(&planned.code);
    }
}

fn check_unit_load(ctx: &SweepContext<'_>, state: &mut SweepState<'_>, quarter: &Quarter) {
    let units: f32 = quarter
        .courses
        .iter()
        .filter_map(|planned| ctx.aliases.resolve(ctx.catalog, &planned.code))
        .map(|course| course.units.load_value())
        .sum();

    let max = ctx.settings.max_units_per_quarter;
    if units > max {
        state.report.push_plan(
            ValidationMessage::new(
                MessageCode::OverUnitLoad,
                format!(
                    "{} has {units} units, above the limit of {max}",
                    quarter.name
                ),
            )
            .in_quarter(&quarter.name),
        );
    }
}

/// Report in-quarter and cross-quarter duplicates; returns each course once
fn distinct_courses<'q>(
    ctx: &SweepContext<'_>,
    state: &mut SweepState<'_>,
    quarter: &'q Quarter,
) -> Vec<&'q PlannedCourse> {
    let name = quarter.name.as_str();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut distinct = Vec::new();
    for planned in &quarter.courses {
        let count = counts.entry(planned.key()).or_insert(0);
        if *count == 0 {
            distinct.push(planned);
        }
        *count += 1;
    }

    for planned in &distinct {
        let key = planned.key();
        if counts.get(&key).copied().unwrap_or(0) > 1 {
            state.report.push_plan(
                ValidationMessage::new(
                    MessageCode::DuplicateCourseInQuarter,
                    format!("{} is scheduled more than once in {name}", planned.code),
                )
                .in_quarter(name)
                .for_course(&planned.code),
            );
        }

        let earlier = ctx
            .aliases
            .expand(&planned.code)
            .into_iter()
            .any(|code| state.seen.contains(&code));
        if earlier {
            state.report.push_plan(
                ValidationMessage::new(
                    MessageCode::DuplicateCourse,
                    format!("{} is already scheduled in an earlier quarter", planned.code),
                )
                .in_quarter(name)
                .for_course(&planned.code),
            );
        }
    }

    distinct
}

fn check_course(
    ctx: &SweepContext<'_>,
    state: &mut SweepState<'_>,
    term: Term,
    quarter: &str,
    planned: &PlannedCourse,
    scheduled_here: &HashSet<String>,
) {
    let code = planned.code.as_str();
    let resolved = ctx.aliases.resolve(ctx.catalog, code);
    // Course-level messages are keyed by the published catalog code
    let key = resolved.map_or_else(|| canonical_code(code), |course| course.code.clone());

    if ctx.completed.contains(code) {
        let message = ValidationMessage::new(
            MessageCode::CourseAlreadyCompleted,
            format!("{code} is already completed"),
        )
        .in_quarter(quarter)
        .for_course(code);
        state.report.push_plan(message.clone());
        state.report.push_course(&key, message);
    }

    let Some(course) = resolved else {
        state.report.push_course(
            &key,
            ValidationMessage::new(
                MessageCode::UnknownCourse,
                format!("{code} is not in the course catalog"),
            )
            .in_quarter(quarter)
            .for_course(code),
        );
        return;
    };

    if !course.is_offered_in(term.season) {
        let offered = course
            .offered_quarters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        state.report.push_course(
            &key,
            ValidationMessage::new(
                MessageCode::NotOffered,
                format!("{code} is not offered in {}; offered: {offered}", term.season),
            )
            .in_quarter(quarter)
            .for_course(code),
        );
    }

    // Any one taken prerequisite counts as satisfied; grades are not checked.
    let prerequisites = course.prerequisite_codes();
    if !prerequisites.is_empty() && !state.taken.contains_any(&prerequisites) {
        state.report.push_course(
            &key,
            ValidationMessage::new(
                MessageCode::PrereqUnmet,
                format!(
                    "{code} requires one of {} before {quarter}",
                    prerequisites.join(", ")
                ),
            )
            .in_quarter(quarter)
            .for_course(code)
            .with_related(prerequisites),
        );
    }

    let unmet: Vec<String> = course
        .corequisites
        .iter()
        .filter(|coreq| {
            !state.taken.contains(coreq) && !scheduled_here.contains(&canonical_code(coreq))
        })
        .cloned()
        .collect();
    if !unmet.is_empty() {
        state.report.push_course(
            &key,
            ValidationMessage::new(
                MessageCode::CoreqUnmet,
                format!(
                    "{code} must be taken with {} in {quarter} or earlier",
                    unmet.join(", ")
                ),
            )
            .in_quarter(quarter)
            .for_course(code)
            .with_related(unmet),
        );
    }
}
