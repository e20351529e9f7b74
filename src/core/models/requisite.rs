//! Prerequisite and corequisite decoding
//!
//! Catalog requisite data arrives in several shapes: free text
//! ("MATH 11 or MATH 9"), structured group objects, arrays mixing both, and
//! JSON text stored in a string column. Everything is decoded here into
//! [`PrereqGroup`] values and plain code lists, once, when a course record is
//! loaded. Malformed entries are logged and contribute no codes.

use super::course::canonical_code;
use crate::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One prerequisite clause of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrereqGroup {
    /// A single course that must be taken first
    Required {
        /// Required course code
        course: String,
        /// Minimum grade (carried, not enforced)
        #[serde(default, alias = "minGrade", skip_serializing_if = "Option::is_none")]
        min_grade: Option<String>,
    },
    /// Any one of several courses
    OneOf {
        /// Alternative course codes
        courses: Vec<String>,
        /// Minimum grade (carried, not enforced)
        #[serde(default, alias = "minGrade", skip_serializing_if = "Option::is_none")]
        min_grade: Option<String>,
    },
    /// Advisory only; never blocks enrollment
    Recommended {
        /// Recommended course codes
        courses: Vec<String>,
    },
}

impl PrereqGroup {
    /// Course codes referenced by this group
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::Required { course, .. } => vec![course.as_str()],
            Self::OneOf { courses, .. } | Self::Recommended { courses } => {
                courses.iter().map(String::as_str).collect()
            }
        }
    }

    /// Whether this group gates enrollment (everything but `Recommended`)
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        !matches!(self, Self::Recommended { .. })
    }

    /// Minimum grade attached to the group, if any
    #[must_use]
    pub fn min_grade(&self) -> Option<&str> {
        match self {
            Self::Required { min_grade, .. } | Self::OneOf { min_grade, .. } => {
                min_grade.as_deref()
            }
            Self::Recommended { .. } => None,
        }
    }
}

/// Codes referenced by the blocking groups, de-duplicated by canonical code,
/// in first-seen order.
#[must_use]
pub fn blocking_codes(groups: &[PrereqGroup]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut codes = Vec::new();
    for code in groups
        .iter()
        .filter(|g| g.is_blocking())
        .flat_map(PrereqGroup::codes)
    {
        let key = canonical_code(code);
        if !seen.contains(&key) {
            seen.push(key);
            codes.push(code.to_string());
        }
    }
    codes
}

/// Scan free text for course codes of the form `DEPT NUM[SUFFIX]`.
///
/// A department is 2-6 uppercase ASCII letters, optionally followed by
/// whitespace, then digits and up to two uppercase suffix letters. Results
/// are normalized to `"DEPT NUM"` and de-duplicated in order of appearance.
#[must_use]
pub fn extract_course_codes(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut codes: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let at_boundary = i == 0 || !bytes[i - 1].is_ascii_alphanumeric();
        if !(at_boundary && bytes[i].is_ascii_uppercase()) {
            i += 1;
            continue;
        }

        let dept_start = i;
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_uppercase() {
            j += 1;
        }
        let dept_len = j - dept_start;

        let mut k = j;
        while k < bytes.len() && bytes[k] == b' ' {
            k += 1;
        }
        let num_start = k;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        let num_len = k - num_start;
        let suffix_start = k;
        while k < bytes.len() && k - suffix_start < 2 && bytes[k].is_ascii_uppercase() {
            k += 1;
        }
        let ends_cleanly = k == bytes.len() || !bytes[k].is_ascii_alphanumeric();

        if (2..=6).contains(&dept_len) && num_len > 0 && ends_cleanly {
            let code = format!("{} {}", &text[dept_start..j], &text[num_start..k]);
            if !codes.contains(&code) {
                codes.push(code);
            }
            i = k;
        } else {
            i = j.max(i + 1);
        }
    }

    codes
}

/// Decode prerequisite data of any supported shape into groups.
///
/// `owner` is the course code the data belongs to, used for logging only.
#[must_use]
pub fn decode_prerequisites(value: &Value, owner: &str) -> Vec<PrereqGroup> {
    match value {
        Value::Null => Vec::new(),
        Value::String(text) => decode_prerequisite_text(text, owner),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| decode_prerequisites(item, owner))
            .collect(),
        Value::Object(map) => decode_prerequisite_object(value, map, owner),
        other => {
            warn!("Course {owner}: ignoring prerequisite value {other}");
            Vec::new()
        }
    }
}

/// Decode corequisite data of any supported shape into a code list.
#[must_use]
pub fn decode_corequisites(value: &Value, owner: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    collect_corequisites(value, owner, &mut codes);

    let mut seen = Vec::new();
    codes.retain(|code| {
        let key = canonical_code(code);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    codes
}

fn collect_corequisites(value: &Value, owner: &str, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) => match parse_embedded_json(text, owner) {
            Some(Ok(inner)) => collect_corequisites(&inner, owner, out),
            Some(Err(())) => {}
            None => out.extend(extract_course_codes(text)),
        },
        Value::Array(items) => {
            for item in items {
                collect_corequisites(item, owner, out);
            }
        }
        Value::Object(map) => out.extend(codes_in_object(map)),
        other => warn!("Course {owner}: ignoring corequisite value {other}"),
    }
}

/// When `text` looks like JSON, parse it.
///
/// Returns `None` for plain text, `Some(Err(()))` for JSON-looking text that
/// failed to parse (already logged).
fn parse_embedded_json(text: &str, owner: &str) -> Option<Result<Value, ()>> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('[') || trimmed.starts_with('{')) {
        return None;
    }
    Some(serde_json::from_str(trimmed).map_err(|e| {
        warn!("Course {owner}: unreadable requisite data {trimmed:?}: {e}");
    }))
}

fn decode_prerequisite_text(text: &str, owner: &str) -> Vec<PrereqGroup> {
    match parse_embedded_json(text, owner) {
        Some(Ok(inner)) => return decode_prerequisites(&inner, owner),
        Some(Err(())) => return Vec::new(),
        None => {}
    }

    let lowered = text.to_ascii_lowercase();
    if lowered.contains("recommend") {
        let courses = extract_course_codes(text);
        return if courses.is_empty() {
            Vec::new()
        } else {
            vec![PrereqGroup::Recommended { courses }]
        };
    }

    let mut groups = Vec::new();
    for clause in split_clauses(text) {
        let mut courses = extract_course_codes(clause);
        match courses.len() {
            0 => debug!("Course {owner}: no course codes in prerequisite clause {clause:?}"),
            1 => groups.push(PrereqGroup::Required {
                course: courses.remove(0),
                min_grade: None,
            }),
            _ => groups.push(PrereqGroup::OneOf {
                courses,
                min_grade: None,
            }),
        }
    }
    groups
}

/// Split prerequisite text into conjunctive clauses at top-level `;` and
/// ` and `. Text inside parentheses stays with its clause.
fn split_clauses(text: &str) -> Vec<&str> {
    let lowered = text.to_ascii_lowercase();
    let lower = lowered.as_bytes();
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < lower.len() {
        match lower[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => {
                clauses.push(&text[start..i]);
                start = i + 1;
            }
            b' ' if depth == 0 && lower[i..].starts_with(b" and ") => {
                clauses.push(&text[start..i]);
                i += " and ".len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    clauses.push(&text[start..]);

    clauses
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

fn decode_prerequisite_object(value: &Value, map: &Map<String, Value>, owner: &str) -> Vec<PrereqGroup> {
    if let Ok(group) = serde_json::from_value::<PrereqGroup>(value.clone()) {
        return vec![group];
    }

    let mut courses = codes_in_object(map);
    if courses.is_empty() {
        warn!("Course {owner}: prerequisite group without course codes: {value}");
        return Vec::new();
    }

    let kind = ["type", "kind", "mode"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(|k| {
            k.chars()
                .filter(char::is_ascii_alphabetic)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .unwrap_or_default();
    let min_grade = ["minGrade", "min_grade", "grade"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    match kind.as_str() {
        "recommended" | "recommend" | "advisory" => vec![PrereqGroup::Recommended { courses }],
        "oneof" | "anyof" | "or" | "any" => vec![PrereqGroup::OneOf { courses, min_grade }],
        _ if courses.len() == 1 => vec![PrereqGroup::Required {
            course: courses.remove(0),
            min_grade,
        }],
        _ => courses
            .into_iter()
            .map(|course| PrereqGroup::Required {
                course,
                min_grade: min_grade.clone(),
            })
            .collect(),
    }
}

/// Course codes listed under the usual keys of a structured group object.
fn codes_in_object(map: &Map<String, Value>) -> Vec<String> {
    let mut codes = Vec::new();
    for key in ["course", "code", "courseCode"] {
        if let Some(text) = map.get(key).and_then(Value::as_str) {
            codes.extend(normalize_listed_code(text));
        }
    }
    for key in ["courses", "options", "codes", "oneOf", "one_of"] {
        if let Some(items) = map.get(key).and_then(Value::as_array) {
            for text in items.iter().filter_map(Value::as_str) {
                codes.extend(normalize_listed_code(text));
            }
        }
    }
    codes
}

/// A code listed in a structured field: extracted when recognizable,
/// otherwise kept verbatim (trimmed).
fn normalize_listed_code(text: &str) -> Vec<String> {
    let found = extract_course_codes(text);
    if found.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        }
    } else {
        found
    }
}
