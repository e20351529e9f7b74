//! Integration tests for loading catalog, plan, and requirement files.

use course_planner::core::error::LoadError;
use course_planner::core::loader;
use course_planner::core::models::{CourseStatus, PrereqGroup, Season, Units};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

#[test]
fn sample_catalog_decodes_every_shape() {
    let catalog = loader::load_catalog(sample("catalog.json")).unwrap();
    assert_eq!(catalog.len(), 17);

    let calc = catalog.get("MATH 12").unwrap();
    assert_eq!(calc.prerequisite_codes(), vec!["MATH 11".to_string()]);

    let arch = catalog.get("csen 122").unwrap();
    assert_eq!(
        arch.prerequisite_codes(),
        vec!["CSEN 20".to_string(), "CSEN 21".to_string()]
    );
    assert_eq!(arch.offered_quarters, vec![Season::Winter, Season::Spring]);

    let embedded = catalog.get("CSEN 20").unwrap();
    assert!(matches!(
        embedded.prerequisites.as_slice(),
        [PrereqGroup::OneOf { courses, .. }] if courses.len() == 2
    ));

    let logic = catalog.get("CSEN 21").unwrap();
    assert_eq!(logic.aliases, vec!["ELEN 21".to_string()]);
    assert_eq!(logic.offered_quarters, vec![Season::Fall, Season::Winter]);

    let lab = catalog.get("PHYS 31L").unwrap();
    assert_eq!(lab.corequisites, vec!["PHYS 31".to_string()]);

    let project = catalog.get("CSEN 174").unwrap();
    assert_eq!(project.units, Units::Range { min: 2.0, max: 6.0 });
    assert_eq!(project.prerequisite_codes(), vec!["CSEN 12".to_string()]);
}

#[test]
fn sample_plan_accepts_strings_and_objects() {
    let plan = loader::load_plan(sample("plan.json")).unwrap();
    assert_eq!(plan.quarters.len(), 5);
    assert_eq!(plan.completed_courses.len(), 2);
    assert!(plan.completed_courses[1].transfer);

    let settings = plan.settings.unwrap();
    assert!(!settings.include_summer);
    assert!((settings.max_units_per_quarter - 19.0).abs() < f32::EPSILON);

    let fall = plan.quarter("Fall-2026").unwrap();
    assert_eq!(fall.courses[2].code, "CSEN 174");
    assert_eq!(fall.courses[2].status, Some(CourseStatus::Planned));
}

#[test]
fn sample_requirements_load() {
    let requirements = loader::load_requirements(sample("requirements.json")).unwrap();
    assert_eq!(requirements.len(), 5);
    let electives = requirements
        .iter()
        .find(|r| r.name == "Upper-Division Electives")
        .unwrap();
    assert_eq!(electives.total_required(), 2);
}

#[test]
fn invalid_json_reports_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = loader::load_catalog(&path).unwrap_err();
    match err {
        LoadError::Json { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = loader::load_plan(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
