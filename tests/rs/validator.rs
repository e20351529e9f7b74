//! Integration tests for plan validation.

use course_planner::core::error::PlanError;
use course_planner::core::loader;
use course_planner::core::models::{
    Catalog, Course, PlanSettings, PrereqGroup, Quarter, RequirementGroup, Season, Units, UserPlan,
};
use course_planner::core::validator::{validate, MessageCode, MessageLevel};
use std::path::PathBuf;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

fn required(code: &str) -> PrereqGroup {
    PrereqGroup::Required {
        course: code.to_string(),
        min_grade: None,
    }
}

fn course(code: &str, units: f32, prerequisites: &[&str]) -> Course {
    let mut course = Course::new(code, Units::Fixed(units));
    for prereq in prerequisites {
        course.add_prerequisite(required(prereq));
    }
    course
}

fn calculus_catalog() -> Catalog {
    Catalog::from_courses([
        course("MATH 11", 4.0, &[]),
        course("MATH 12", 4.0, &["MATH 11"]),
        course("CSEN 10", 5.0, &[]),
    ])
}

fn settings() -> PlanSettings {
    PlanSettings::default()
}

#[test]
fn completed_prerequisite_is_accepted() {
    let plan = UserPlan::new()
        .with_completed(&["MATH 11"])
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["MATH 12"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    assert!(report.messages_for_course("MATH 12").is_empty());
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn missing_prerequisite_is_reported_with_related_codes() {
    let plan = UserPlan::new().with_quarter(Quarter::new("Fall-2025").with_courses(&["MATH 12"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    let messages = report.messages_for_course("MATH 12");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].code, MessageCode::PrereqUnmet);
    assert_eq!(messages[0].level, MessageLevel::Warning);
    assert_eq!(messages[0].related, vec!["MATH 11".to_string()]);
    assert_eq!(messages[0].quarter.as_deref(), Some("Fall-2025"));
}

#[test]
fn later_quarter_never_satisfies_earlier_one() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["MATH 11"]))
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["MATH 12"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    assert!(report.course_has("MATH 12", MessageCode::PrereqUnmet));
}

#[test]
fn earlier_quarter_satisfies_later_one_regardless_of_listing_order() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["MATH 12"]))
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["MATH 11"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    assert!(!report.course_has("MATH 12", MessageCode::PrereqUnmet));
}

#[test]
fn course_in_two_quarters_is_one_duplicate_error() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["CSEN 10"]))
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["CSEN 10"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    let duplicates = report.plan_messages_with(MessageCode::DuplicateCourse);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].quarter.as_deref(), Some("Winter-2026"));
    assert_eq!(duplicates[0].level, MessageLevel::Error);
    assert!(report.has_errors());
}

#[test]
fn course_twice_in_one_quarter_is_in_quarter_duplicate() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["CSEN 10", "CSEN 10"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    assert_eq!(
        report
            .plan_messages_with(MessageCode::DuplicateCourseInQuarter)
            .len(),
        1
    );
    assert!(!report.has_code(MessageCode::DuplicateCourse));
}

#[test]
fn unit_load_at_the_limit_is_accepted() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["MATH 11", "CSEN 10"]));

    let at_limit = validate(
        &calculus_catalog(),
        &[],
        &plan,
        &PlanSettings::with_max_units(9.0),
    )
    .unwrap();
    assert!(!at_limit.has_code(MessageCode::OverUnitLoad));

    let over_limit = validate(
        &calculus_catalog(),
        &[],
        &plan,
        &PlanSettings::with_max_units(8.0),
    )
    .unwrap();
    let over = over_limit.plan_messages_with(MessageCode::OverUnitLoad);
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].quarter.as_deref(), Some("Fall-2025"));
}

#[test]
fn empty_requirement_is_fully_satisfied() {
    let plan = UserPlan::new();
    let requirements = [RequirementGroup::new("Nothing")];

    let report = validate(&calculus_catalog(), &requirements, &plan, &settings()).unwrap();
    let progress = report.requirements["Nothing"];
    assert!(progress.satisfied);
    assert_eq!(progress.progress, 100);
}

#[test]
fn requirement_progress_counts_completed_and_planned() {
    let plan = UserPlan::new()
        .with_completed(&["MATH 11"])
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["CSEN 10"]));
    let requirements = [
        RequirementGroup::new("Core").requiring(&["MATH 11", "MATH 12", "CSEN 10"]),
        RequirementGroup::new("Pick One").choosing(1, &["MATH 12", "CSEN 10"]),
    ];

    let report = validate(&calculus_catalog(), &requirements, &plan, &settings()).unwrap();
    let core = report.requirements["Core"];
    assert!(!core.satisfied);
    assert_eq!((core.completed, core.total, core.progress), (2, 3, 66));

    let pick = report.requirements["Pick One"];
    assert!(pick.satisfied);
    assert_eq!(pick.progress, 100);
}

#[test]
fn cross_listed_course_satisfies_prerequisite() {
    let mut logic = course("CSEN 21", 4.0, &[]);
    logic.add_alias("ELEN 21");
    let catalog = Catalog::from_courses([
        logic,
        course("ELEN 21", 4.0, &[]),
        course("CSEN 122", 4.0, &["CSEN 21"]),
    ]);
    let plan = UserPlan::new()
        .with_completed(&["ELEN 21"])
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["CSEN 122"]));

    let report = validate(&catalog, &[], &plan, &settings()).unwrap();
    assert!(!report.course_has("CSEN 122", MessageCode::PrereqUnmet));
}

#[test]
fn cross_listed_course_in_two_quarters_is_duplicate() {
    let mut logic = course("CSEN 21", 4.0, &[]);
    logic.add_alias("ELEN 21");
    let catalog = Catalog::from_courses([logic, course("ELEN 21", 4.0, &[])]);
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["ELEN 21"]))
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["CSEN 21"]));

    let report = validate(&catalog, &[], &plan, &settings()).unwrap();
    assert_eq!(report.plan_messages_with(MessageCode::DuplicateCourse).len(), 1);
}

#[test]
fn offering_and_summer_policy_are_checked() {
    let catalog = Catalog::from_courses([
        course("MATH 11", 4.0, &[]).offered_in(&[Season::Fall]),
        course("CSEN 10", 5.0, &[]),
    ]);
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Spring-2026").with_courses(&["MATH 11"]))
        .with_quarter(Quarter::new("Summer-2026").with_courses(&["CSEN 10"]));
    let no_summer = PlanSettings {
        include_summer: false,
        ..PlanSettings::default()
    };

    let report = validate(&catalog, &[], &plan, &no_summer).unwrap();
    assert!(report.course_has("MATH 11", MessageCode::NotOffered));
    let summer = report.plan_messages_with(MessageCode::SummerNotIncluded);
    assert_eq!(summer.len(), 1);
    assert_eq!(summer[0].quarter.as_deref(), Some("Summer-2026"));

    let report = validate(&catalog, &[], &plan, &settings()).unwrap();
    assert!(!report.has_code(MessageCode::SummerNotIncluded));
}

#[test]
fn malformed_quarter_name_aborts_validation() {
    let plan = UserPlan::new().with_quarter(Quarter::new("Fall 2025").with_courses(&["MATH 11"]));

    let err = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap_err();
    assert!(matches!(err, PlanError::InvalidQuarterName { ref name, .. } if name == "Fall 2025"));
}

#[test]
fn quarter_names_must_use_full_season_names() {
    for name in ["S-2026", "Fall - 2025", "fall-2025", "Autumn-2025"] {
        let plan = UserPlan::new().with_quarter(Quarter::new(name).with_courses(&["MATH 11"]));
        let err = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap_err();
        assert!(
            matches!(err, PlanError::InvalidQuarterName { name: ref bad, .. } if bad == name),
            "expected {name:?} to be rejected"
        );
    }
}

#[test]
fn cross_listed_code_uses_the_catalog_entry() {
    let mut logic = course("CSEN 21", 5.0, &[]).offered_in(&[Season::Winter]);
    logic.add_alias("ELEN 21");
    let catalog = Catalog::from_courses([logic, course("MATH 11", 5.0, &[])]);
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["ELEN 21", "MATH 11"]));

    let report = validate(&catalog, &[], &plan, &PlanSettings::with_max_units(9.0)).unwrap();
    assert!(!report.has_code(MessageCode::UnknownCourse));
    assert_eq!(report.plan_messages_with(MessageCode::OverUnitLoad).len(), 1);
    assert!(report.course_has("CSEN 21", MessageCode::NotOffered));
}

#[test]
fn course_messages_share_one_entry_per_course() {
    let plan = UserPlan::new()
        .with_quarter(Quarter::new("Fall-2025").with_courses(&["math 12"]))
        .with_quarter(Quarter::new("Winter-2026").with_courses(&["MATH 12"]));

    let report = validate(&calculus_catalog(), &[], &plan, &settings()).unwrap();
    assert_eq!(report.course_messages.len(), 1);
    let unmet = &report.course_messages["MATH 12"];
    assert_eq!(unmet.len(), 2);
    assert!(unmet.iter().all(|m| m.code == MessageCode::PrereqUnmet));
}

#[test]
fn validation_is_deterministic() {
    let catalog = loader::load_catalog(sample("catalog.json")).unwrap();
    let plan = loader::load_plan(sample("plan.json")).unwrap();
    let requirements = loader::load_requirements(sample("requirements.json")).unwrap();
    let settings = plan.settings.unwrap_or_default();

    let first = validate(&catalog, &requirements, &plan, &settings).unwrap();
    let second = validate(&catalog, &requirements, &plan, &settings).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn sample_plan_has_single_offering_warning() {
    let catalog = loader::load_catalog(sample("catalog.json")).unwrap();
    let plan = loader::load_plan(sample("plan.json")).unwrap();
    let requirements = loader::load_requirements(sample("requirements.json")).unwrap();
    let settings = plan.settings.unwrap_or_default();

    let report = validate(&catalog, &requirements, &plan, &settings).unwrap();

    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 1);
    let offering = report.messages_for_course("CSEN 146");
    assert_eq!(offering.len(), 1);
    assert_eq!(offering[0].code, MessageCode::NotOffered);
    assert_eq!(offering[0].quarter.as_deref(), Some("Fall-2026"));

    assert_eq!(report.metadata.quarters_checked, 5);
    assert_eq!(report.metadata.courses_checked, 14);
    assert_eq!(report.metadata.warning_count, 1);

    assert_eq!(report.requirements["Calculus Sequence"].progress, 100);
    assert!(report.requirements["Programming Core"].satisfied);
    assert!(report.requirements["Upper-Division Electives"].satisfied);
    assert!(report.requirements["Logic Design"].satisfied);

    let physics = report.requirements["Physics"];
    assert!(!physics.satisfied);
    assert_eq!((physics.completed, physics.total, physics.progress), (2, 3, 66));
}
