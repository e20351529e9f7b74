//! Course catalog model

use super::course::{canonical_code, Course};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only course catalog, indexed by canonical course code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Course>", into = "Vec<Course>")]
pub struct Catalog {
    courses: BTreeMap<String, Course>,
}

/// A requisite code that names no catalog course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Course declaring the requisite
    pub course: String,
    /// Referenced code missing from the catalog
    pub missing: String,
    /// Whether the reference is a corequisite (otherwise a prerequisite)
    pub corequisite: bool,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of courses. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.insert(course);
        }
        catalog
    }

    /// Add or replace a course
    ///
    /// # Returns
    /// `true` if the course was new, `false` if it replaced an existing entry
    pub fn insert(&mut self, course: Course) -> bool {
        self.courses.insert(course.key(), course).is_none()
    }

    /// Look up a course by code in any spacing or case
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.get(&canonical_code(code))
    }

    /// Whether the catalog contains a course
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Iterate over courses in canonical-code order
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Iterate over (canonical code, course) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Course)> {
        self.courses.iter()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Find prerequisite and corequisite codes that name no catalog course
    ///
    /// Recommended groups are included: an advisory reference to a missing
    /// course is still a catalog data problem.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for course in self.iter() {
            for code in course.prerequisites.iter().flat_map(|g| g.codes()) {
                if !self.contains(code) {
                    dangling.push(DanglingReference {
                        course: course.code.clone(),
                        missing: code.to_string(),
                        corequisite: false,
                    });
                }
            }
            for code in &course.corequisites {
                if !self.contains(code) {
                    dangling.push(DanglingReference {
                        course: course.code.clone(),
                        missing: code.clone(),
                        corequisite: true,
                    });
                }
            }
        }
        dangling
    }
}

impl From<Vec<Course>> for Catalog {
    fn from(courses: Vec<Course>) -> Self {
        Self::from_courses(courses)
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        catalog.courses.into_values().collect()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        Self::from_courses(iter)
    }
}
