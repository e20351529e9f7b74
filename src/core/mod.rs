//! Core module for plan validation and catalog analysis

pub mod config;
pub mod depth;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod validator;

/// Returns the current version of the `CoursePlanner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
