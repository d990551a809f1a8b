//! Config Validation Tests
//!
//! Typo detection, range validation and file round-trips for
//! `JournalConfig`, exercised through the public API only.

use std::io::Write;

use energy_insights::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use energy_insights::config::{ConfigError, JournalConfig};
use energy_insights::types::Trend;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_sleep_section_warns_with_suggestion() {
    let toml_str = r#"
[sleep]
target_hour = 7.5
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("target_hour"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("sleep.target_hours"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn unknown_section_warns_without_suggestion() {
    let toml_str = r#"
[dashboard]
theme = "dark"
"#;
    let warnings = validate_unknown_keys(toml_str);
    // The section and its key are both unknown
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
    assert!(warnings.iter().any(|w| w.field == "dashboard.theme"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[profile]
name = "alex"
utc_offset_minutes = 60

[sleep]
target_hours = 7.5
surplus_repayment_rate = 0.8

[decay]
base_rate = 0.5
wake_time = "06:30"

[signal]
days = 45
trend = "declining"

[insights]
high_signal_threshold = 72.0
low_signal_threshold = 50.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn typo_in_unknown_key_still_loads() {
    let toml_str = r#"
[decay]
bse_rate = 0.9
"#;
    let cfg = JournalConfig::from_toml_str(toml_str).expect("typos are not fatal");
    assert_eq!(cfg.decay.base_rate, 0.5, "misspelled key must not apply");
}

#[test]
fn every_default_key_is_known() {
    let known = known_config_keys();
    let toml_str = JournalConfig::default().to_toml().unwrap();
    let warnings = validate_unknown_keys(&toml_str);
    assert!(warnings.is_empty(), "Default config has unknown keys: {warnings:?}");
    assert!(known.contains("decay.wake_time"));
}

#[test]
fn far_off_key_gets_no_suggestion() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("completely.unrelated_key", &known), None);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_pass_validation() {
    assert!(JournalConfig::default().validate().is_ok());
    let (errors, warnings) = validate_ranges(&JournalConfig::default());
    assert!(errors.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn inverted_insight_thresholds_are_rejected() {
    let toml_str = r#"
[insights]
high_signal_threshold = 50.0
low_signal_threshold = 60.0
"#;
    let err = JournalConfig::from_toml_str(toml_str).unwrap_err();
    let ConfigError::Validation(errors) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(errors.iter().any(|e| e.contains("insights.signal_threshold")));
}

#[test]
fn all_errors_are_collected() {
    let mut cfg = JournalConfig::default();
    cfg.decay.base_rate = 0.0;
    cfg.sleep.min_start_energy = 9.0;
    cfg.signal.base_value = 500.0;
    cfg.profile.utc_offset_minutes = 2000;

    let Err(ConfigError::Validation(errors)) = cfg.validate() else {
        panic!("expected validation errors");
    };
    assert!(errors.len() >= 4, "Got: {errors:?}");
    assert!(errors.iter().any(|e| e.contains("decay.base_rate")));
    assert!(errors.iter().any(|e| e.contains("sleep.start_energy")));
    assert!(errors.iter().any(|e| e.contains("signal.base_value")));
    assert!(errors.iter().any(|e| e.contains("profile.utc_offset_minutes")));
}

#[test]
fn non_finite_values_are_rejected() {
    let toml_str = r#"
[decay]
debt_rate = nan
"#;
    let err = JournalConfig::from_toml_str(toml_str).unwrap_err();
    assert!(
        err.to_string().contains("decay.debt_rate must be a finite number"),
        "Got: {err}"
    );
}

#[test]
fn unusual_sleep_target_only_warns() {
    let mut cfg = JournalConfig::default();
    cfg.sleep.target_hours = 3.0;
    let (errors, warnings) = validate_ranges(&cfg);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert!(cfg.validate().is_ok());
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal_config.toml");

    let mut cfg = JournalConfig::default();
    cfg.profile.name = "sam".to_string();
    cfg.signal.trend = Trend::Improving;
    cfg.decay.wake_time = chrono::NaiveTime::from_hms_opt(6, 45, 0).unwrap();
    cfg.save_to_file(&path).unwrap();

    let loaded = JournalConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = JournalConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io(ref p, _) if p == &path));
}

#[test]
fn malformed_file_is_parse_error_with_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sleep\ntarget_hours = ").unwrap();

    let err = JournalConfig::load_from_file(file.path()).unwrap_err();
    match err {
        ConfigError::Parse(ref p, _) => assert_eq!(p, file.path()),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn partial_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[decay]\nwake_time = \"08:15\"").unwrap();

    let cfg = JournalConfig::load_from_file(file.path()).unwrap();
    assert_eq!(
        cfg.decay.wake_time,
        chrono::NaiveTime::from_hms_opt(8, 15, 0).unwrap()
    );
    assert_eq!(cfg.sleep, JournalConfig::default().sleep);
    assert_eq!(cfg.decay.base_rate, 0.5);
}

#[test]
fn shipped_example_matches_defaults() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("journal_config.example.toml");
    let cfg = JournalConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg, JournalConfig::default());
    assert!(validate_unknown_keys(&std::fs::read_to_string(&path).unwrap()).is_empty());
}
