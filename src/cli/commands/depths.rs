//! Depths command handler

use course_planner::core::depth::{compute_depths, rank_by_depth, CourseDepth};
use course_planner::core::loader;
use course_planner::{error, verbose, warn};
use std::fmt::Write;
use std::path::Path;

/// Run the depths command.
///
/// # Arguments
/// * `catalog_file` - Catalog JSON file
/// * `codes` - Courses to analyze; empty means every catalog course
/// * `top` - Keep only the N deepest entries
/// * `json` - Print JSON instead of a table
///
/// # Errors
/// Returns a printable message when the catalog cannot be loaded
pub fn run(
    catalog_file: &Path,
    codes: &[String],
    top: Option<usize>,
    json: bool,
) -> Result<(), String> {
    let catalog = loader::load_catalog(catalog_file).map_err(|e| {
        error!("Failed to load catalog: {e}");
        format!("✗ {e}")
    })?;

    for dangling in catalog.dangling_references() {
        let kind = if dangling.corequisite {
            "corequisite"
        } else {
            "prerequisite"
        };
        warn!(
            "{} lists {kind} {} which is not in the catalog",
            dangling.course, dangling.missing
        );
    }

    let targets = (!codes.is_empty()).then_some(codes);
    let mut ranked = rank_by_depth(compute_depths(&catalog, targets));
    if let Some(n) = top {
        ranked.truncate(n);
    }
    verbose!("Computed depth for {} course(s)", ranked.len());

    if json {
        let text = serde_json::to_string_pretty(&ranked)
            .map_err(|e| format!("✗ Failed to serialize depths: {e}"))?;
        println!("{text}");
    } else {
        print!("{}", format_table(&ranked));
    }
    Ok(())
}

/// Two-column table of course codes and depths
fn format_table(depths: &[CourseDepth]) -> String {
    let width = depths
        .iter()
        .map(|d| d.course_code.len())
        .max()
        .unwrap_or(0)
        .max("Course".len());

    let mut table = format!("{:<width$}  Depth\n", "Course");
    for entry in depths {
        let _ = writeln!(table, "{:<width$}  {}", entry.course_code, entry.depth);
    }
    table
}
