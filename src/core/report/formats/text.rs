//! Plain-text report generator

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;

/// Terminal summary built from the report's `Display` form
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(format!("{}\n{}", ctx.title, ctx.report))
    }
}
