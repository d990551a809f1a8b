//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults::{SIGNAL_CEILING, SIGNAL_FLOOR};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for JournalConfig.
///
/// Maintained by hand to match the struct hierarchy in journal_config.rs.
/// Any new field added to JournalConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [profile]
        "profile",
        "profile.name",
        "profile.utc_offset_minutes",
        // [sleep]
        "sleep",
        "sleep.target_hours",
        "sleep.surplus_repayment_rate",
        "sleep.fatigue_growth_rate",
        "sleep.fatigue_growth_rate_high_debt",
        "sleep.high_debt_hours",
        "sleep.fatigue_recovery_rate",
        "sleep.fatigue_recovery_rate_rested",
        "sleep.base_start_energy",
        "sleep.min_start_energy",
        "sleep.fatigue_start_penalty",
        // [decay]
        "decay",
        "decay.base_rate",
        "decay.debt_rate",
        "decay.wake_time",
        "decay.default_signal",
        "decay.high_signal",
        "decay.low_signal",
        "decay.high_signal_factor",
        "decay.low_signal_factor",
        "decay.moderate_fatigue",
        "decay.severe_fatigue",
        "decay.moderate_fatigue_factor",
        "decay.severe_fatigue_factor",
        "decay.fatigue_energy_penalty",
        // [signal]
        "signal",
        "signal.days",
        "signal.base_value",
        "signal.variability",
        "signal.trend",
        "signal.drift_per_day",
        // [insights]
        "insights",
        "insights.high_signal_threshold",
        "insights.low_signal_threshold",
        "insights.sleep_debt_warning_hours",
        "insights.fatigue_warning",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// Key Walking
// ============================================================================

/// Call `visit` with the dotted path and value of every entry under `value`,
/// parents before their children.
fn visit_paths(value: &toml::Value, prefix: &str, visit: &mut dyn FnMut(String, &toml::Value)) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, child) in table {
        let path = match prefix {
            "" => key.clone(),
            _ => format!("{prefix}.{key}"),
        };
        visit(path.clone(), child);
        visit_paths(child, &path, visit);
    }
}

/// Dotted paths of every key in a TOML tree, tables included.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    visit_paths(value, prefix, &mut |path: String, _: &toml::Value| keys.push(path));
    keys
}

/// Dotted paths of every float in the tree that is NaN or infinite.
pub fn non_finite_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    visit_paths(value, prefix, &mut |path: String, v: &toml::Value| {
        if v.as_float().is_some_and(|f| !f.is_finite()) {
            keys.push(path);
        }
    });
    keys
}

// ============================================================================
// Typo Suggestions
// ============================================================================

/// Largest edit distance that still earns a "did you mean".
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Edit distance between two strings (insert, delete, substitute).
fn levenshtein(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    // row[j] = distance between the prefix of `a` seen so far and target[..j]
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[target.len()]
}

/// Closest known key within `MAX_SUGGESTION_DISTANCE` edits, if any.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, k)| k.to_owned())
}

/// Warn about keys in the raw TOML that JournalConfig does not know.
///
/// Unparseable input yields no warnings; the serde pass reports it.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };
    let known = known_config_keys();

    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            message: format!("Unknown config key '{key}'"),
            suggestion: suggest_correction(&key, &known),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Checks
// ============================================================================

/// Plausibility checks beyond internal consistency.
///
/// Returns `(errors, warnings)`: errors make `validate()` fail, warnings are
/// logged for values that are legal but unusual.
pub fn validate_ranges(config: &super::JournalConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Simulated signal must start inside the range it is clamped to
    if !config.signal.base_in_range() {
        errors.push(format!(
            "signal.base_value = {:.1} is outside the signal range ({SIGNAL_FLOOR}-{SIGNAL_CEILING})",
            config.signal.base_value
        ));
    }

    // Default signal feeds the decay modifiers like a real sample would
    let default_signal = config.decay.default_signal;
    if !(SIGNAL_FLOOR..=SIGNAL_CEILING).contains(&default_signal) {
        errors.push(format!(
            "decay.default_signal = {default_signal:.1} is outside the signal range ({SIGNAL_FLOOR}-{SIGNAL_CEILING})"
        ));
    }

    // Sleep target: anything outside 4-12 hours is almost certainly a typo
    let target = config.sleep.target_hours;
    if target > 0.0 && !(4.0..=12.0).contains(&target) {
        warnings.push(ValidationWarning {
            field: "sleep.target_hours".to_string(),
            message: format!("sleep.target_hours = {target:.1} is unusual (typical 4-12 hours)"),
            suggestion: None,
        });
    }

    // The simulator caps variability at the range width
    if config.signal.variability > SIGNAL_CEILING - SIGNAL_FLOOR {
        warnings.push(ValidationWarning {
            field: "signal.variability".to_string(),
            message: format!(
                "signal.variability = {:.1} exceeds the signal range width and is capped to it",
                config.signal.variability
            ),
            suggestion: None,
        });
    }

    // Thresholds outside the signal range can never match
    for (field, value) in [
        ("insights.high_signal_threshold", config.insights.high_signal_threshold),
        ("insights.low_signal_threshold", config.insights.low_signal_threshold),
    ] {
        if !(SIGNAL_FLOOR..=SIGNAL_CEILING).contains(&value) {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!(
                    "{field} = {value:.1} lies outside the signal range ({SIGNAL_FLOOR}-{SIGNAL_CEILING})"
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}
