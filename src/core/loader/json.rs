//! JSON input files

use crate::core::error::LoadError;
use crate::core::models::{Catalog, Course, CourseRecord, RequirementGroup, UserPlan};
use crate::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Catalog files are either a list of records or an object keyed by code
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CourseRecord>),
    Wrapped { courses: Vec<CourseRecord> },
    Keyed(BTreeMap<String, CourseRecord>),
}

/// Requirement files are a bare list or wrapped in `{"requirements": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementsFile {
    List(Vec<RequirementGroup>),
    Wrapped { requirements: Vec<RequirementGroup> },
}

/// Parse catalog JSON text.
///
/// Records without a code are skipped with a warning. In keyed form the
/// object key supplies the code when the record omits one.
///
/// # Errors
/// Returns an error if the text is not a supported catalog shape
pub fn catalog_from_str(text: &str) -> Result<Catalog, serde_json::Error> {
    let records: Vec<CourseRecord> = match serde_json::from_str(text)? {
        CatalogFile::List(records) | CatalogFile::Wrapped { courses: records } => records,
        CatalogFile::Keyed(map) => map
            .into_iter()
            .map(|(key, mut record)| {
                if record.code.trim().is_empty() {
                    record.code = key;
                }
                record
            })
            .collect(),
    };

    let mut catalog = Catalog::new();
    for record in records {
        if record.code.trim().is_empty() {
            warn!("Skipping catalog record without a course code: {:?}", record.title);
            continue;
        }
        let course = Course::from(record);
        let code = course.code.clone();
        if !catalog.insert(course) {
            warn!("Duplicate catalog entry for {code}; keeping the last one");
        }
    }
    Ok(catalog)
}

/// Parse plan JSON text
///
/// # Errors
/// Returns an error if the text is not a plan object
pub fn plan_from_str(text: &str) -> Result<UserPlan, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse requirement JSON text
///
/// # Errors
/// Returns an error if the text is not a requirement list
pub fn requirements_from_str(text: &str) -> Result<Vec<RequirementGroup>, serde_json::Error> {
    Ok(match serde_json::from_str(text)? {
        RequirementsFile::List(groups) | RequirementsFile::Wrapped { requirements: groups } => {
            groups
        }
    })
}

/// Load a course catalog from a JSON file
///
/// # Arguments
/// * `path` - Path to the catalog file
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read or parsed
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let catalog = parse_file(path, catalog_from_str)?;
    debug!("Loaded {} course(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a plan from a JSON file
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read or parsed
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<UserPlan, LoadError> {
    let path = path.as_ref();
    let plan = parse_file(path, plan_from_str)?;
    debug!(
        "Loaded plan with {} quarter(s) from {}",
        plan.quarters.len(),
        path.display()
    );
    Ok(plan)
}

/// Load requirement groups from a JSON file
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read or parsed
pub fn load_requirements<P: AsRef<Path>>(path: P) -> Result<Vec<RequirementGroup>, LoadError> {
    let path = path.as_ref();
    let requirements = parse_file(path, requirements_from_str)?;
    debug!(
        "Loaded {} requirement group(s) from {}",
        requirements.len(),
        path.display()
    );
    Ok(requirements)
}

fn parse_file<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PrereqGroup, Season, Units};

    #[test]
    fn test_catalog_list_form() {
        let catalog = catalog_from_str(
            r#"[
                {"code": "MATH 11", "title": "Calculus I", "units": "4"},
                {"code": "MATH 12", "units": 4, "prerequisites": "MATH 11",
                 "offeredQuarters": ["Winter", "Spring"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let calc2 = catalog.get("math 12").unwrap();
        assert_eq!(calc2.units, Units::Fixed(4.0));
        assert_eq!(calc2.prerequisite_codes(), vec!["MATH 11"]);
        assert!(calc2.is_offered_in(Season::Winter));
        assert!(!calc2.is_offered_in(Season::Fall));
    }

    #[test]
    fn test_catalog_keyed_form() {
        let catalog = catalog_from_str(
            r#"{
                "CSEN 21": {"units": "4", "crossListings": ["ELEN 21"]},
                "CSEN 12": {"code": "CSEN 12", "units": "2-5",
                            "prerequisites": [{"type": "one_of", "courses": ["CSEN 11", "CSEN 10"]}]}
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.get("CSEN21").unwrap().aliases, vec!["ELEN 21"]);
        let data_structures = catalog.get("CSEN 12").unwrap();
        assert!(matches!(
            data_structures.prerequisites[0],
            PrereqGroup::OneOf { .. }
        ));
        assert_eq!(data_structures.units.to_string(), "2-5");
    }

    #[test]
    fn test_catalog_skips_codeless_records() {
        let catalog =
            catalog_from_str(r#"{"courses": [{"title": "Mystery"}, {"code": "PHIL 1"}]}"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("PHIL 1"));
    }

    #[test]
    fn test_requirements_both_forms() {
        let bare = requirements_from_str(r#"[{"name": "Calc", "coursesRequired": ["MATH 11"]}]"#)
            .unwrap();
        let wrapped =
            requirements_from_str(r#"{"requirements": [{"name": "Calc", "coursesRequired": ["MATH 11"]}]}"#)
                .unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_plan("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("not/here.json"));
    }
}
