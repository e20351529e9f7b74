//! CLI command handlers for `CoursePlanner`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod depths;
pub mod validate;
