//! Validate command handler
//!
//! Loads catalog, plan, and requirement files, runs the validator, and
//! renders the report to stdout or a file.

use course_planner::config::Config;
use course_planner::core::loader;
use course_planner::core::models::{PlanSettings, UserPlan};
use course_planner::core::report::{reporter_for, ReportContext, ReportFormat};
use course_planner::core::validator::validate;
use course_planner::{error, info, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of one `validate` invocation
#[derive(Debug, Clone)]
pub struct ValidateOptions<'a> {
    /// Catalog file
    pub catalog: &'a Path,
    /// Plan file
    pub plan: &'a Path,
    /// Optional requirements file
    pub requirements: Option<&'a Path>,
    /// CLI unit ceiling
    pub max_units: Option<f32>,
    /// Exclude summer quarters
    pub no_summer: bool,
    /// Output format
    pub format: ReportFormat,
    /// Explicit output file
    pub output: Option<&'a Path>,
}

/// Run the validate command.
///
/// # Returns
/// Whether the report contains error-level messages
///
/// # Errors
/// Returns a printable message when an input file cannot be loaded, a
/// quarter name is malformed, or the report cannot be written
pub fn run(options: &ValidateOptions, config: &Config) -> Result<bool, String> {
    let catalog = loader::load_catalog(options.catalog).map_err(|e| {
        error!("Failed to load catalog: {e}");
        format!("✗ {e}")
    })?;
    let plan = loader::load_plan(options.plan).map_err(|e| {
        error!("Failed to load plan: {e}");
        format!("✗ {e}")
    })?;
    let requirements = match options.requirements {
        Some(path) => loader::load_requirements(path).map_err(|e| {
            error!("Failed to load requirements: {e}");
            format!("✗ {e}")
        })?,
        None => Vec::new(),
    };

    let settings = resolve_settings(config, &plan, options.max_units, options.no_summer);
    verbose!(
        "Validating {} against {} course(s), unit limit {}, summer {}",
        options.plan.display(),
        catalog.len(),
        settings.max_units_per_quarter,
        if settings.include_summer { "included" } else { "excluded" }
    );

    let report = validate(&catalog, &requirements, &plan, &settings).map_err(|e| {
        error!("Validation aborted for {}: {e}", options.plan.display());
        format!("✗ {e}")
    })?;

    let title = plan_title(options.plan);
    let ctx = ReportContext::new(&title, &report, &plan, &catalog, &settings);
    let reporter = reporter_for(options.format);

    match output_path(options, config, &title) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
            }
            reporter
                .generate(&ctx, &path)
                .map_err(|e| format!("✗ Failed to write report {}: {e}", path.display()))?;
            info!("Report written to {}", path.display());
            println!("✓ Report generated: {}", path.display());
        }
        None => {
            let rendered = reporter
                .render(&ctx)
                .map_err(|e| format!("✗ Failed to render report: {e}"))?;
            print!("{rendered}");
        }
    }

    Ok(report.has_errors())
}

/// Settings for a run: CLI flags over plan settings over config defaults
#[must_use]
pub fn resolve_settings(
    config: &Config,
    plan: &UserPlan,
    max_units: Option<f32>,
    no_summer: bool,
) -> PlanSettings {
    let mut settings = plan
        .settings
        .unwrap_or_else(|| config.validation.to_settings());
    if let Some(max_units) = max_units {
        settings.max_units_per_quarter = max_units;
    }
    if no_summer {
        settings.include_summer = false;
    }
    settings
}

fn plan_title(plan: &Path) -> String {
    plan.file_stem()
        .map_or_else(|| "plan".to_string(), |s| s.to_string_lossy().to_string())
}

/// Where to write the report; `None` means stdout.
///
/// Markdown and HTML land in the configured reports directory when no
/// output file is given.
fn output_path(options: &ValidateOptions, config: &Config, title: &str) -> Option<PathBuf> {
    if let Some(path) = options.output {
        return Some(path.to_path_buf());
    }
    match options.format {
        ReportFormat::Markdown | ReportFormat::Html if !config.paths.reports_dir.is_empty() => {
            Some(
                PathBuf::from(&config.paths.reports_dir)
                    .join(format!("{title}.{}", options.format.extension())),
            )
        }
        _ => None,
    }
}
