//! Quarter model: seasons, academic terms, and the courses planned in them

use super::course::canonical_code;
use crate::core::error::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic season.
///
/// `FromStr` is lenient (case, abbreviations) for catalog offering data;
/// quarter names go through [`Season::from_name`].
///
/// Variant order is the chronological order within one academic year label:
/// Winter, Spring, Summer, then Fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    /// Winter quarter
    Winter,
    /// Spring quarter
    Spring,
    /// Summer quarter
    Summer,
    /// Fall quarter
    Fall,
}

impl Season {
    const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Display name ("Fall")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Season whose display name is exactly `name` ("Fall", not "fall" or "F")
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|season| season.name() == name)
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" | "w" => Ok(Self::Winter),
            "spring" | "s" | "sp" => Ok(Self::Spring),
            "summer" | "su" | "m" => Ok(Self::Summer),
            "fall" | "autumn" | "f" => Ok(Self::Fall),
            _ => Err(format!("Unknown season: '{s}'")),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One academic term: a season in a year.
///
/// Ordering is chronological: by year, then by season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    /// Calendar year
    pub year: u16,
    /// Season within the year
    pub season: Season,
}

impl Term {
    /// Create a new term
    #[must_use]
    pub const fn new(season: Season, year: u16) -> Self {
        Self { year, season }
    }

    /// Parse a quarter name in `Season-Year` form (e.g., "Fall-2025").
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidQuarterName`] when the name is not exactly
    /// a known season and a four-digit year joined by a single hyphen.
    pub fn parse(name: &str) -> PlanResult<Self> {
        let invalid = |reason: &str| PlanError::InvalidQuarterName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = name.trim().split('-');
        let (Some(season_part), Some(year_part), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected the form Season-Year"));
        };

        let season = Season::from_name(season_part)
            .ok_or_else(|| invalid("season must be Winter, Spring, Summer, or Fall"))?;

        if year_part.len() != 4 || !year_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("year must be four digits"));
        }
        let year = year_part
            .parse::<u16>()
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self::new(season, year))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.season, self.year)
    }
}

/// Status of a planned course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    /// Scheduled for the future
    Planned,
    /// Already finished
    Completed,
    /// Currently being taken
    #[serde(alias = "in_progress", alias = "inProgress")]
    InProgress,
}

/// A course code placed in a quarter (or in the completed list)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlannedCourseRepr", rename_all = "camelCase")]
pub struct PlannedCourse {
    /// Course code as entered (e.g., "MATH 12")
    pub code: String,

    /// Optional status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,

    /// Optional letter grade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    /// Transfer credit flag
    pub transfer: bool,
}

/// Accepted input shapes: a bare code string or a full entry object.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlannedCourseRepr {
    Code(String),
    Entry(PlannedCourseEntry),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannedCourseEntry {
    #[serde(alias = "courseCode", alias = "course_code")]
    code: String,
    #[serde(default)]
    status: Option<CourseStatus>,
    #[serde(default)]
    grade: Option<String>,
    #[serde(default, alias = "isTransfer")]
    transfer: bool,
}

impl From<PlannedCourseRepr> for PlannedCourse {
    fn from(repr: PlannedCourseRepr) -> Self {
        match repr {
            PlannedCourseRepr::Code(code) => Self::new(&code),
            PlannedCourseRepr::Entry(entry) => Self {
                code: entry.code.trim().to_string(),
                status: entry.status,
                grade: entry.grade,
                transfer: entry.transfer,
            },
        }
    }
}

impl PlannedCourse {
    /// Create a planned course with no status, grade, or transfer flag
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_string(),
            status: None,
            grade: None,
            transfer: false,
        }
    }

    /// Canonical lookup key
    #[must_use]
    pub fn key(&self) -> String {
        canonical_code(&self.code)
    }
}

impl From<&str> for PlannedCourse {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One quarter of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    /// Quarter name in `Season-Year` form; the chronological sort key
    pub name: String,

    /// Courses planned in this quarter (order is not significant)
    #[serde(default)]
    pub courses: Vec<PlannedCourse>,
}

impl Quarter {
    /// Create an empty quarter
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            courses: Vec::new(),
        }
    }

    /// Add a course by code
    pub fn add_course(&mut self, code: &str) {
        self.courses.push(PlannedCourse::new(code));
    }

    /// Builder form of [`Quarter::add_course`]
    #[must_use]
    pub fn with_courses(mut self, codes: &[&str]) -> Self {
        for code in codes {
            self.add_course(code);
        }
        self
    }

    /// Parse this quarter's name into a term
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidQuarterName`] for malformed names
    pub fn term(&self) -> PlanResult<Term> {
        Term::parse(&self.name)
    }
}
