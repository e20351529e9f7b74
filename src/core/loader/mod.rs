//! Loaders for catalog, plan, and requirement files
//!
//! All input decoding happens here and in the model deserializers, so the
//! validator and depth analyzer only ever see the typed models.

pub mod json;

pub use json::{
    catalog_from_str, load_catalog, load_plan, load_requirements, plan_from_str,
    requirements_from_str,
};
