//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS. Every value taken
//! from input files is escaped before substitution.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let meta = &ctx.report.metadata;
        let mut output = HTML_TEMPLATE.to_string();

        let status_class = if ctx.report.has_errors() {
            "status-error"
        } else if meta.warning_count > 0 {
            "status-warn"
        } else {
            "status-ok"
        };

        output = output.replace("{{title}}", &escape_html(ctx.title));
        output = output.replace("{{status}}", ctx.status());
        output = output.replace("{{status_class}}", status_class);
        output = output.replace("{{quarter_count}}", &meta.quarters_checked.to_string());
        output = output.replace("{{course_count}}", &meta.courses_checked.to_string());
        output = output.replace(
            "{{max_units}}",
            &ctx.settings.max_units_per_quarter.to_string(),
        );
        output = output.replace("{{error_count}}", &meta.error_count.to_string());
        output = output.replace("{{warning_count}}", &meta.warning_count.to_string());
        output = output.replace("{{engine_version}}", &escape_html(&meta.engine_version));

        output = output.replace("{{quarter_rows}}", &Self::generate_quarter_rows(ctx));
        output = output.replace("{{message_rows}}", &Self::generate_message_rows(ctx));
        output = output.replace(
            "{{requirement_rows}}",
            &Self::generate_requirement_rows(ctx),
        );

        output
    }

    fn generate_quarter_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for quarter in ctx.quarters() {
            let courses: Vec<String> = quarter
                .courses
                .iter()
                .map(|pc| {
                    format!(
                        "<span class=\"course-badge\">{}</span> {}",
                        escape_html(&pc.code),
                        escape_html(ctx.course_title(&pc.code))
                    )
                })
                .collect();
            let class = if ctx.is_over_loaded(quarter) {
                " class=\"over-load\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "  <tr{class}><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&quarter.name),
                courses.join("<br>"),
                ctx.quarter_units(quarter)
            );
        }

        html
    }

    fn generate_message_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for message in ctx.report.all_messages() {
            let _ = writeln!(
                html,
                "  <tr class=\"level-{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                message.level,
                message.level,
                message.code,
                escape_html(message.quarter.as_deref().unwrap_or("")),
                escape_html(message.course_code.as_deref().unwrap_or("")),
                escape_html(&message.message)
            );
        }

        if html.is_empty() {
            html.push_str("  <tr><td colspan=\"5\">No messages</td></tr>\n");
        }
        html
    }

    fn generate_requirement_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for (name, progress) in &ctx.report.requirements {
            let _ = writeln!(
                html,
                "  <tr><td>{}</td><td><progress max=\"100\" value=\"{pct}\"></progress> {pct}%</td><td>{}/{}</td></tr>",
                escape_html(name),
                progress.completed,
                progress.total,
                pct = progress.progress
            );
        }

        if html.is_empty() {
            html.push_str("  <tr><td colspan=\"3\">No requirements supplied</td></tr>\n");
        }
        html
    }
}

/// Escape text for HTML element and attribute content
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::test_support;

    #[test]
    fn renders_escaped_page() {
        let (catalog, plan, settings, report) = test_support::sample();
        let ctx = ReportContext::new("<plan>", &report, &plan, &catalog, &settings);
        let html = HtmlReporter::new().render(&ctx).unwrap();

        assert!(html.contains("<title>Plan Validation Report: &lt;plan&gt;</title>"));
        assert!(!html.contains("{{"));
        assert!(html.contains("class=\"over-load\""));
        assert!(html.contains("<td>PREREQ_UNMET</td>"));
        assert!(html.contains("No requirements supplied"));
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_html("A&B <\"x\">"), "A&amp;B &lt;&quot;x&quot;&gt;");
    }
}
