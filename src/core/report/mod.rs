//! Report rendering for validation results
//!
//! Renders a [`ValidationReport`] as plain text, Markdown, HTML, or JSON.
//! Markdown and HTML use embedded templates with `{{placeholder}}`
//! substitution.

pub mod formats;

use crate::core::models::{Catalog, PlanSettings, Quarter, UserPlan};
use crate::core::validator::{MessageCode, ValidationReport};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report rendering
///
/// Bundles the validated plan with the inputs it was validated against, so
/// templates can show quarter unit totals next to the messages.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Report title (usually the plan file name)
    pub title: &'a str,
    /// Validation result being rendered
    pub report: &'a ValidationReport,
    /// The validated plan
    pub plan: &'a UserPlan,
    /// Catalog the plan was validated against
    pub catalog: &'a Catalog,
    /// Settings in effect for the run
    pub settings: &'a PlanSettings,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        title: &'a str,
        report: &'a ValidationReport,
        plan: &'a UserPlan,
        catalog: &'a Catalog,
        settings: &'a PlanSettings,
    ) -> Self {
        Self {
            title,
            report,
            plan,
            catalog,
            settings,
        }
    }

    /// Quarters in chronological order; unparsable names sort last by name
    #[must_use]
    pub fn quarters(&self) -> Vec<&'a Quarter> {
        let mut quarters: Vec<&Quarter> = self.plan.quarters.iter().collect();
        quarters.sort_by_key(|q| {
            let term = q.term().ok();
            (term.is_none(), term, q.name.clone())
        });
        quarters
    }

    /// Load units of a quarter, counting catalog courses only
    #[must_use]
    pub fn quarter_units(&self, quarter: &Quarter) -> f32 {
        quarter
            .courses
            .iter()
            .filter_map(|pc| self.catalog.get(&pc.code))
            .map(|c| c.units.load_value())
            .sum()
    }

    /// Whether the quarter carries an `OVER_UNIT_LOAD` message
    #[must_use]
    pub fn is_over_loaded(&self, quarter: &Quarter) -> bool {
        self.report
            .plan_messages_with(MessageCode::OverUnitLoad)
            .iter()
            .any(|m| m.quarter.as_deref() == Some(quarter.name.as_str()))
    }

    /// One-line verdict for the report header
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.report.has_errors() {
            "Plan has blocking errors"
        } else if self.report.warning_count() > 0 {
            "Plan is valid with warnings"
        } else {
            "Plan is valid"
        }
    }

    /// Course title from the catalog, or an empty string
    #[must_use]
    pub fn course_title(&self, code: &str) -> &'a str {
        self.catalog.get(code).map_or("", |c| c.title.as_str())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_helpers() {
        let (catalog, plan, settings, report) = test_support::sample();
        let ctx = ReportContext::new("sample", &report, &plan, &catalog, &settings);

        let quarter = &plan.quarters[0];
        assert!((ctx.quarter_units(quarter) - 9.0).abs() < f32::EPSILON);
        assert!(ctx.is_over_loaded(quarter));
        assert_eq!(ctx.status(), "Plan is valid with warnings");
        assert_eq!(ctx.course_title("math12"), "Calculus II");
    }

    #[test]
    fn test_quarters_sorted() {
        let plan = UserPlan::new()
            .with_quarter(Quarter::new("Spring-2026"))
            .with_quarter(Quarter::new("Fall-2025"));
        let report = ValidationReport::default();
        let catalog = Catalog::new();
        let settings = PlanSettings::default();
        let ctx = ReportContext::new("t", &report, &plan, &catalog, &settings);
        let names: Vec<&str> = ctx.quarters().iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Fall-2025", "Spring-2026"]);
    }
}
