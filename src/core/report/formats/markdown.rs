//! Markdown report generator
//!
//! Renders a validation report as Markdown tables, suitable for pasting into
//! an issue or a README.

use crate::core::report::{ReportContext, ReportGenerator};
use crate::core::validator::ValidationMessage;
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let meta = &ctx.report.metadata;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", ctx.title);
        output = output.replace("{{status}}", ctx.status());
        output = output.replace("{{quarter_count}}", &meta.quarters_checked.to_string());
        output = output.replace("{{course_count}}", &meta.courses_checked.to_string());
        output = output.replace(
            "{{max_units}}",
            &ctx.settings.max_units_per_quarter.to_string(),
        );
        output = output.replace("{{error_count}}", &meta.error_count.to_string());
        output = output.replace("{{warning_count}}", &meta.warning_count.to_string());
        output = output.replace("{{engine_version}}", &meta.engine_version);

        output = output.replace("{{quarter_table}}", &Self::generate_quarter_table(ctx));
        output = output.replace(
            "{{plan_messages}}",
            &Self::generate_message_list(&ctx.report.plan_messages),
        );
        output = output.replace("{{course_messages}}", &Self::generate_course_sections(ctx));
        output = output.replace("{{requirements}}", &Self::generate_requirement_table(ctx));

        output
    }

    /// Quarter-by-quarter course and unit table
    fn generate_quarter_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Quarter | Courses | Units |\n");
        table.push_str("|---|---|---|\n");

        for quarter in ctx.quarters() {
            let courses: Vec<String> = quarter
                .courses
                .iter()
                .map(|pc| {
                    let title = ctx.course_title(&pc.code);
                    if title.is_empty() {
                        pc.code.clone()
                    } else {
                        format!("{} - {title}", pc.code)
                    }
                })
                .collect();
            let marker = if ctx.is_over_loaded(quarter) { " ⚠️" } else { "" };
            let _ = writeln!(
                table,
                "| {} | {} | {}{marker} |",
                quarter.name,
                courses.join(", "),
                ctx.quarter_units(quarter)
            );
        }

        table
    }

    fn generate_message_list(messages: &[ValidationMessage]) -> String {
        if messages.is_empty() {
            return "_None_\n".to_string();
        }

        let mut list = String::new();
        for message in messages {
            let icon = if message.is_error() { "❌" } else { "⚠️" };
            let _ = write!(list, "- {icon} `{}`", message.code);
            if let Some(quarter) = &message.quarter {
                let _ = write!(list, " ({quarter})");
            }
            let _ = writeln!(list, ": {}", message.message);
        }
        list
    }

    fn generate_course_sections(ctx: &ReportContext) -> String {
        if ctx.report.course_messages.is_empty() {
            return "_None_\n".to_string();
        }

        let mut sections = String::new();
        for (code, messages) in &ctx.report.course_messages {
            let _ = writeln!(sections, "### {code}\n");
            sections.push_str(&Self::generate_message_list(messages));
            sections.push('\n');
        }
        sections
    }

    fn generate_requirement_table(ctx: &ReportContext) -> String {
        if ctx.report.requirements.is_empty() {
            return "_No requirements supplied_\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Requirement | Progress | Completed | Satisfied |\n");
        table.push_str("|---|---|---|---|\n");
        for (name, progress) in &ctx.report.requirements {
            let mark = if progress.satisfied { "✅" } else { "—" };
            let _ = writeln!(
                table,
                "| {name} | {}% | {}/{} | {mark} |",
                progress.progress, progress.completed, progress.total
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
