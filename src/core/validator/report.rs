//! Validation report: messages, requirement progress, and run metadata

use crate::core::models::canonical_code;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Blocking problem
    Error,
    /// Advisory problem
    Warning,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Stable machine-readable message code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageCode {
    /// Quarter units above the configured ceiling
    OverUnitLoad,
    /// Same course twice in one quarter
    DuplicateCourseInQuarter,
    /// Same course in more than one quarter
    DuplicateCourse,
    /// Course scheduled although already completed
    CourseAlreadyCompleted,
    /// Course scheduled in a season it is not offered
    NotOffered,
    /// None of the prerequisites taken before the quarter
    PrereqUnmet,
    /// Corequisites neither taken nor scheduled alongside
    CoreqUnmet,
    /// Planned course not present in the catalog
    UnknownCourse,
    /// Courses in a summer quarter while summers are excluded
    SummerNotIncluded,
}

impl MessageCode {
    /// Wire form of the code (e.g., `"PREREQ_UNMET"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverUnitLoad => "OVER_UNIT_LOAD",
            Self::DuplicateCourseInQuarter => "DUPLICATE_COURSE_IN_QUARTER",
            Self::DuplicateCourse => "DUPLICATE_COURSE",
            Self::CourseAlreadyCompleted => "COURSE_ALREADY_COMPLETED",
            Self::NotOffered => "NOT_OFFERED",
            Self::PrereqUnmet => "PREREQ_UNMET",
            Self::CoreqUnmet => "COREQ_UNMET",
            Self::UnknownCourse => "UNKNOWN_COURSE",
            Self::SummerNotIncluded => "SUMMER_NOT_INCLUDED",
        }
    }

    /// Level every message with this code carries
    #[must_use]
    pub const fn level(self) -> MessageLevel {
        match self {
            Self::DuplicateCourseInQuarter | Self::DuplicateCourse => MessageLevel::Error,
            _ => MessageLevel::Warning,
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single plan-level or course-level finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    /// Severity
    pub level: MessageLevel,
    /// Stable code
    pub code: MessageCode,
    /// Human-readable description
    pub message: String,
    /// Quarter the finding belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
    /// Course the finding belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    /// Other course codes involved (unmet requisites)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl ValidationMessage {
    /// Create a message; the level follows from the code
    #[must_use]
    pub fn new(code: MessageCode, message: impl Into<String>) -> Self {
        Self {
            level: code.level(),
            code,
            message: message.into(),
            quarter: None,
            course_code: None,
            related: Vec::new(),
        }
    }

    /// Attach the quarter name
    #[must_use]
    pub fn in_quarter(mut self, quarter: &str) -> Self {
        self.quarter = Some(quarter.to_string());
        self
    }

    /// Attach the course code
    #[must_use]
    pub fn for_course(mut self, code: &str) -> Self {
        self.course_code = Some(code.to_string());
        self
    }

    /// Attach related course codes
    #[must_use]
    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related = related;
        self
    }

    /// Whether this message blocks (error level)
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.code, self.message)
    }
}

/// Progress toward one requirement group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementProgress {
    /// All needed courses are taken
    pub satisfied: bool,
    /// Whole-number percentage, 0..=100
    pub progress: u32,
    /// Courses counted toward the requirement
    pub completed: usize,
    /// Courses needed
    pub total: usize,
}

/// Facts about the validation run itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Version of the engine that produced the report
    pub engine_version: String,
    /// Quarters swept
    pub quarters_checked: usize,
    /// Course placements checked
    pub courses_checked: usize,
    /// Error-level messages across the report
    pub error_count: usize,
    /// Warning-level messages across the report
    pub warning_count: usize,
}

/// Output of a validation run
///
/// Maps are ordered so that identical inputs serialize to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Plan-level findings, in sweep order
    pub plan_messages: Vec<ValidationMessage>,
    /// Course-level findings keyed by the plan's course code
    pub course_messages: BTreeMap<String, Vec<ValidationMessage>>,
    /// Progress keyed by requirement name
    pub requirements: BTreeMap<String, RequirementProgress>,
    /// Run metadata
    pub metadata: ReportMetadata,
}

impl ValidationReport {
    /// Record a plan-level message
    pub fn push_plan(&mut self, message: ValidationMessage) {
        self.plan_messages.push(message);
    }

    /// Record a course-level message under `course_code`
    pub fn push_course(&mut self, course_code: &str, message: ValidationMessage) {
        self.course_messages
            .entry(course_code.to_string())
            .or_default()
            .push(message);
    }

    /// Every message in the report, plan-level first
    pub fn all_messages(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.plan_messages
            .iter()
            .chain(self.course_messages.values().flatten())
    }

    /// Number of error-level messages
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.all_messages().filter(|m| m.is_error()).count()
    }

    /// Number of warning-level messages
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.all_messages().filter(|m| !m.is_error()).count()
    }

    /// Whether any error-level message is present
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_messages().any(ValidationMessage::is_error)
    }

    /// Whether any message carries `code`
    #[must_use]
    pub fn has_code(&self, code: MessageCode) -> bool {
        self.all_messages().any(|m| m.code == code)
    }

    /// Plan-level messages carrying `code`
    #[must_use]
    pub fn plan_messages_with(&self, code: MessageCode) -> Vec<&ValidationMessage> {
        self.plan_messages.iter().filter(|m| m.code == code).collect()
    }

    /// Course-level messages for a course code in any spacing or case
    #[must_use]
    pub fn messages_for_course(&self, code: &str) -> Vec<&ValidationMessage> {
        let key = canonical_code(code);
        self.course_messages
            .iter()
            .filter(|(k, _)| canonical_code(k) == key)
            .flat_map(|(_, messages)| messages)
            .collect()
    }

    /// Whether a course has a course-level message with `code`
    #[must_use]
    pub fn course_has(&self, course: &str, code: MessageCode) -> bool {
        self.messages_for_course(course)
            .iter()
            .any(|m| m.code == code)
    }

    pub(crate) fn refresh_counts(&mut self) {
        self.metadata.error_count = self.error_count();
        self.metadata.warning_count = self.warning_count();
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation: {} error(s), {} warning(s) across {} quarter(s)",
            self.metadata.error_count, self.metadata.warning_count, self.metadata.quarters_checked
        )?;

        if !self.plan_messages.is_empty() {
            writeln!(f)?;
            writeln!(f, "Plan:")?;
            for message in &self.plan_messages {
                writeln!(f, "  {message}")?;
            }
        }

        if !self.course_messages.is_empty() {
            writeln!(f)?;
            writeln!(f, "Courses:")?;
            for (course, messages) in &self.course_messages {
                writeln!(f, "  {course}")?;
                for message in messages {
                    writeln!(f, "    {message}")?;
                }
            }
        }

        if !self.requirements.is_empty() {
            writeln!(f)?;
            writeln!(f, "Requirements:")?;
            for (name, progress) in &self.requirements {
                let mark = if progress.satisfied { "✓" } else { "✗" };
                writeln!(
                    f,
                    "  {mark} {name}: {}% ({}/{})",
                    progress.progress, progress.completed, progress.total
                )?;
            }
        }

        Ok(())
    }
}
