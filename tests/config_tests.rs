//! Integration tests for configuration management

use course_planner::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!((config.validation.max_units_per_quarter - 19.0).abs() < f32::EPSILON);
    assert!(config.validation.include_summer);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$COURSE_PLANNER/test.log"

[paths]
reports_dir = "$COURSE_PLANNER/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("courseplanner"));
    assert!(!config.logging.file.contains("$COURSE_PLANNER"));
    assert!(config.paths.reports_dir.ends_with("reports"));
    assert!(!config.paths.reports_dir.contains("$COURSE_PLANNER"));
}

#[test]
fn test_config_partial_toml_takes_validation_defaults() {
    let toml_str = r#"
[logging]
level = "warn"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial config");
    assert_eq!(config.logging.level, "warn");
    assert!((config.validation.max_units_per_quarter - 19.0).abs() < f32::EPSILON);
    assert!(config.validation.include_summer);
    assert!(config.paths.reports_dir.is_empty());
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("max-units", "16.5")
        .expect("Failed to set max units");
    assert_eq!(config.get("max_units_per_quarter").unwrap(), "16.5");

    config
        .set("include_summer", "false")
        .expect("Failed to set include_summer");
    assert_eq!(config.get("include-summer").unwrap(), "false");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();
    assert!(config.set("max-units", "zero").is_err());
    assert!(config.set("max-units", "0").is_err());
    assert!(config.set("max-units", "-4").is_err());
    assert!(config.set("include-summer", "sometimes").is_err());
    assert!((config.validation.max_units_per_quarter - 19.0).abs() < f32::EPSILON);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("max-units", "12").expect("Failed to set max units");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("max-units", &defaults)
        .expect("Failed to unset max units");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.validation, defaults.validation);

    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("max-units", "22").expect("Failed to set max units");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert!((loaded_config.validation.max_units_per_quarter - 22.0).abs() < f32::EPSILON);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        max_units: Some(15.0),
        include_summer: Some(false),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert!((config.validation.max_units_per_quarter - 15.0).abs() < f32::EPSILON);
    assert!(!config.validation.include_summer);
    assert_eq!(config.paths.reports_dir, "./custom_reports");

    let settings = config.validation.to_settings();
    assert!(!settings.include_summer);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.validation;

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.validation, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[validation]"));
    assert!(display_str.contains("[paths]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("max_units_per_quarter"));
    assert!(display_str.contains("reports_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.logging.level, "error");
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
reports_dir = "/my/reports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.reports_dir, "/my/reports");
}

#[test]
fn test_get_courseplanner_dir() {
    let dir = Config::get_courseplanner_dir();

    assert!(dir.to_string_lossy().contains("courseplanner"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
