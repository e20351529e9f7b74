//! Integration tests for prerequisite depth analysis.

use course_planner::core::depth::{compute_depths, rank_by_depth, CourseDepth, DepthAnalyzer};
use course_planner::core::loader;
use course_planner::core::models::{Catalog, Course, PrereqGroup, Units};
use std::path::PathBuf;

fn course(code: &str, prerequisites: &[&str]) -> Course {
    let mut course = Course::new(code, Units::Fixed(4.0));
    for prereq in prerequisites {
        course.add_prerequisite(PrereqGroup::Required {
            course: (*prereq).to_string(),
            min_grade: None,
        });
    }
    course
}

fn sample_catalog() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/catalog.json");
    loader::load_catalog(path).unwrap()
}

#[test]
fn chain_depths_count_edges() {
    let catalog = Catalog::from_courses([
        course("A", &["B"]),
        course("B", &["C"]),
        course("C", &["D"]),
        course("D", &[]),
    ]);

    let depths = compute_depths(&catalog, Some(&["A", "D"][..]));
    assert_eq!(depths, vec![CourseDepth::new("A", 3), CourseDepth::new("D", 0)]);
}

#[test]
fn cycles_terminate() {
    let catalog = Catalog::from_courses([course("A", &["B"]), course("B", &["A"])]);
    let mut analyzer = DepthAnalyzer::new(&catalog);
    assert_eq!(analyzer.depth_of("A"), 2);
    assert_eq!(analyzer.depth_of("B"), 1);

    let catalog = Catalog::from_courses([course("SELF 1", &["SELF 1"])]);
    assert_eq!(DepthAnalyzer::new(&catalog).depth_of("SELF 1"), 1);
}

#[test]
fn unknown_target_has_zero_depth() {
    let catalog = Catalog::from_courses([course("A", &[])]);
    let depths = compute_depths(&catalog, Some(&[" NOPE 1 "][..]));
    assert_eq!(depths, vec![CourseDepth::new("NOPE 1", 0)]);
}

#[test]
fn sample_catalog_ranks_architecture_deepest() {
    let catalog = sample_catalog();
    let ranked = rank_by_depth(compute_depths::<&str>(&catalog, None));

    assert_eq!(ranked.len(), catalog.len());
    assert_eq!(ranked[0], CourseDepth::new("CSEN 122", 4));

    let depth_of = |code: &str| {
        ranked
            .iter()
            .find(|d| d.course_code == code)
            .map(|d| d.depth)
    };
    assert_eq!(depth_of("MATH 14"), Some(3));
    assert_eq!(depth_of("CSEN 12"), Some(2));
    assert_eq!(depth_of("PHYS 31L"), Some(0));
    assert_eq!(depth_of("ENGR 1"), Some(0));
}

#[test]
fn depths_serialize_with_camel_case_keys() {
    let json = serde_json::to_string(&CourseDepth::new("MATH 12", 1)).unwrap();
    assert_eq!(json, r#"{"courseCode":"MATH 12","depth":1}"#);
}
