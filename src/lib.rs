//! Academic plan validation library for `CoursePlanner`
//! Contains the plan validator, the prerequisite depth analyzer, and the
//! catalog/plan models shared by the CLI.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
