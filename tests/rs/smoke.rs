//! Integration smoke tests for `course_planner`

use course_planner::core::loader;
use course_planner::core::report::{reporter_for, ReportContext, ReportFormat};
use course_planner::core::validator::validate;
use course_planner::get_version;
use std::path::PathBuf;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn sample_files_render_in_every_format() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
    let catalog = loader::load_catalog(root.join("catalog.json")).unwrap();
    let plan = loader::load_plan(root.join("plan.json")).unwrap();
    let requirements = loader::load_requirements(root.join("requirements.json")).unwrap();
    let settings = plan.settings.unwrap_or_default();

    let report = validate(&catalog, &requirements, &plan, &settings).unwrap();
    let ctx = ReportContext::new("plan", &report, &plan, &catalog, &settings);

    for format in [
        ReportFormat::Text,
        ReportFormat::Markdown,
        ReportFormat::Html,
        ReportFormat::Json,
    ] {
        let rendered = reporter_for(format).render(&ctx).unwrap();
        assert!(rendered.contains("CSEN 146"), "{format} output lacks CSEN 146");
    }
}
