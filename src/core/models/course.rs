//! Course model

use super::quarter::Season;
use super::requisite::{self, PrereqGroup};
use crate::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Canonical comparison key for a course code: whitespace removed, ASCII uppercased.
///
/// `"csen 21"`, `"CSEN21"` and `" CSEN  21 "` all map to `"CSEN21"`.
#[must_use]
pub fn canonical_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Unit value of a course, either fixed or a variable range (e.g. "2-5").
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum Units {
    /// Fixed unit count
    Fixed(f32),
    /// Variable-unit course
    Range {
        /// Lowest allowed units
        min: f32,
        /// Highest allowed units
        max: f32,
    },
}

impl Units {
    /// Parse catalog unit text such as `"4"`, `"1.5"` or `"2-5"`.
    ///
    /// # Returns
    /// `None` when the text holds no usable number
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some((low, high)) = text.split_once('-') {
            let min = low.trim().parse::<f32>().ok()?;
            let max = high.trim().parse::<f32>().ok()?;
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
                return None;
            }
            return Some(if min <= max {
                Self::Range { min, max }
            } else {
                Self::Range { min: max, max: min }
            });
        }
        let value = text.parse::<f32>().ok()?;
        (value.is_finite() && value >= 0.0).then_some(Self::Fixed(value))
    }

    /// Decode units from loosely typed catalog data (number or text).
    ///
    /// Unusable values fall back to zero units and are logged.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value, owner: &str) -> Self {
        let parsed = match value {
            Value::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| Self::Fixed(v as f32)),
            Value::String(s) => Self::parse(s),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            if !value.is_null() {
                warn!("Course {owner}: unreadable units {value}, counting as 0");
            }
            Self::Fixed(0.0)
        })
    }

    /// Units counted toward a quarter's load. A range counts as its average.
    #[must_use]
    pub fn load_value(&self) -> f32 {
        match *self {
            Self::Fixed(v) => v,
            Self::Range { min, max } => (min + max) / 2.0,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.to_string()
    }
}

/// Represents a course in the catalog
///
/// Deserialization goes through [`CourseRecord`], so the loosely shaped
/// requisite data of a catalog is decoded exactly once, at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CourseRecord", rename_all = "camelCase")]
pub struct Course {
    /// Course code as published (e.g., "CSEN 21")
    pub code: String,

    /// Course title
    pub title: String,

    /// Unit value
    pub units: Units,

    /// Department prefix (e.g., "CSEN")
    pub department: String,

    /// Upper-division flag
    pub upper_division: bool,

    /// Prerequisite groups, in catalog order
    pub prerequisites: Vec<PrereqGroup>,

    /// Corequisite course codes
    pub corequisites: Vec<String>,

    /// Seasons the course is offered in; empty means "not restricted"
    pub offered_quarters: Vec<Season>,

    /// Cross-listed codes naming the same course under another department
    pub aliases: Vec<String>,
}

impl Course {
    /// Create a new course with no requisites
    ///
    /// # Arguments
    /// * `code` - Course code (e.g., "MATH 11")
    /// * `units` - Unit value
    #[must_use]
    pub fn new(code: &str, units: Units) -> Self {
        let code = code.trim().to_string();
        Self {
            department: department_of(&code),
            upper_division: is_upper_division(&code),
            code,
            title: String::new(),
            units,
            prerequisites: Vec::new(),
            corequisites: Vec::new(),
            offered_quarters: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Canonical lookup key for this course
    #[must_use]
    pub fn key(&self) -> String {
        canonical_code(&self.code)
    }

    /// Add a prerequisite group
    pub fn add_prerequisite(&mut self, group: PrereqGroup) {
        if !self.prerequisites.contains(&group) {
            self.prerequisites.push(group);
        }
    }

    /// Add a corequisite by course code
    pub fn add_corequisite(&mut self, code: &str) {
        let key = canonical_code(code);
        if !self.corequisites.iter().any(|c| canonical_code(c) == key) {
            self.corequisites.push(code.trim().to_string());
        }
    }

    /// Add a cross-listed alias
    pub fn add_alias(&mut self, code: &str) {
        let key = canonical_code(code);
        if key != self.key() && !self.aliases.iter().any(|c| canonical_code(c) == key) {
            self.aliases.push(code.trim().to_string());
        }
    }

    /// Restrict the seasons the course is offered in
    #[must_use]
    pub fn offered_in(mut self, seasons: &[Season]) -> Self {
        self.offered_quarters = seasons.to_vec();
        self
    }

    /// Whether the course runs in `season`. Courses with no offering data run every season.
    #[must_use]
    pub fn is_offered_in(&self, season: Season) -> bool {
        self.offered_quarters.is_empty() || self.offered_quarters.contains(&season)
    }

    /// Codes of the blocking (non-recommended) prerequisites, de-duplicated in catalog order.
    #[must_use]
    pub fn prerequisite_codes(&self) -> Vec<String> {
        requisite::blocking_codes(&self.prerequisites)
    }
}

/// Raw catalog record, as supplied by the calling layer.
///
/// Prerequisites and corequisites arrive as plain strings, structured group
/// objects, arrays of either, or JSON text embedded in a string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecord {
    /// Course code
    pub code: String,
    /// Course title
    #[serde(alias = "name")]
    pub title: String,
    /// Units as number or text
    pub units: Value,
    /// Department prefix
    #[serde(alias = "dept")]
    pub department: Option<String>,
    /// Upper-division flag
    #[serde(alias = "upper_division", alias = "isUpperDivision")]
    pub upper_division: Option<bool>,
    /// Prerequisite data in any supported shape
    #[serde(alias = "prereqs")]
    pub prerequisites: Value,
    /// Corequisite data in any supported shape
    #[serde(alias = "coreqs")]
    pub corequisites: Value,
    /// Offered seasons as an array or comma-separated text
    #[serde(alias = "offered", alias = "offered_quarters", alias = "quartersOffered")]
    pub offered_quarters: Value,
    /// Cross-listed codes as an array or comma-separated text
    #[serde(alias = "crossListings", alias = "crosslisted", alias = "crossListed")]
    pub aliases: Value,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        let mut course = Self::new(&record.code, Units::from_value(&record.units, &record.code));
        course.title = record.title.trim().to_string();
        if let Some(department) = record.department.filter(|d| !d.trim().is_empty()) {
            course.department = department.trim().to_string();
        }
        if let Some(upper) = record.upper_division {
            course.upper_division = upper;
        }
        for group in requisite::decode_prerequisites(&record.prerequisites, &course.code) {
            course.add_prerequisite(group);
        }
        for code in requisite::decode_corequisites(&record.corequisites, &course.code) {
            course.add_corequisite(&code);
        }
        course.offered_quarters = decode_seasons(&record.offered_quarters, &course.code);
        for alias in decode_code_list(&record.aliases) {
            course.add_alias(&alias);
        }
        course
    }
}

/// Leading alphabetic prefix of a code ("CSEN 21" -> "CSEN").
fn department_of(code: &str) -> String {
    code.chars()
        .take_while(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Course numbers 100 and above are upper division.
fn is_upper_division(code: &str) -> bool {
    let digits: String = code
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u32>().is_ok_and(|n| n >= 100)
}

fn decode_seasons(value: &Value, owner: &str) -> Vec<Season> {
    let names: Vec<String> = match value {
        Value::String(s) => s.split([',', '/', ';']).map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    let mut seasons = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match name.parse::<Season>() {
            Ok(season) if !seasons.contains(&season) => seasons.push(season),
            Ok(_) => {}
            Err(e) => debug!("Course {owner}: ignoring offering entry: {e}"),
        }
    }
    seasons
}

fn decode_code_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
