//! User plan model

use super::quarter::{PlannedCourse, Quarter};
use serde::{Deserialize, Serialize};

/// Default maximum units per quarter
pub const DEFAULT_MAX_UNITS_PER_QUARTER: f32 = 19.0;

/// Settings that shape a validation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettings {
    /// Unit ceiling per quarter; a quarter strictly above it is over-loaded
    #[serde(default = "default_max_units")]
    pub max_units_per_quarter: f32,

    /// Whether summer quarters are part of the plan
    #[serde(default = "default_include_summer")]
    pub include_summer: bool,
}

const fn default_max_units() -> f32 {
    DEFAULT_MAX_UNITS_PER_QUARTER
}

const fn default_include_summer() -> bool {
    true
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            max_units_per_quarter: DEFAULT_MAX_UNITS_PER_QUARTER,
            include_summer: true,
        }
    }
}

impl PlanSettings {
    /// Settings with a specific unit ceiling
    #[must_use]
    pub fn with_max_units(max_units_per_quarter: f32) -> Self {
        Self {
            max_units_per_quarter,
            ..Self::default()
        }
    }
}

/// A student's multi-quarter plan; the unit of validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlan {
    /// Planned quarters, stored in any order
    #[serde(default)]
    pub quarters: Vec<Quarter>,

    /// Courses finished before the plan starts (no quarter attached)
    #[serde(default, alias = "completed")]
    pub completed_courses: Vec<PlannedCourse>,

    /// Plan-level settings; absent in many stored plans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PlanSettings>,
}

impl UserPlan {
    /// Create an empty plan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quarter
    pub fn add_quarter(&mut self, quarter: Quarter) {
        self.quarters.push(quarter);
    }

    /// Builder form of [`UserPlan::add_quarter`]
    #[must_use]
    pub fn with_quarter(mut self, quarter: Quarter) -> Self {
        self.add_quarter(quarter);
        self
    }

    /// Builder for the completed-course list
    #[must_use]
    pub fn with_completed(mut self, codes: &[&str]) -> Self {
        self.completed_courses
            .extend(codes.iter().map(|c| PlannedCourse::new(c)));
        self
    }

    /// Find a quarter by name
    #[must_use]
    pub fn quarter(&self, name: &str) -> Option<&Quarter> {
        self.quarters.iter().find(|q| q.name == name)
    }

    /// Total number of course placements across all quarters
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.quarters.iter().map(|q| q.courses.len()).sum()
    }
}
