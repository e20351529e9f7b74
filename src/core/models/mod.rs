//! Data models for `CoursePlanner`

pub mod catalog;
pub mod course;
pub mod graph;
pub mod plan;
pub mod quarter;
pub mod requirement;
pub mod requisite;

pub use catalog::{Catalog, DanglingReference};
pub use course::{canonical_code, Course, CourseRecord, Units};
pub use graph::PrereqGraph;
pub use plan::{PlanSettings, UserPlan};
pub use quarter::{CourseStatus, PlannedCourse, Quarter, Season, Term};
pub use requirement::{ChooseFrom, RequirementGroup};
pub use requisite::PrereqGroup;
