//! Journal Configuration - every metric constant as a tunable TOML value
//!
//! Each struct implements `Default` with the values the metrics are defined
//! with, so behavior is unchanged when no config file is present.

use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, MAX_SIMULATION_DAYS, MAX_UTC_OFFSET_MINUTES,
    SIGNAL_CEILING, SIGNAL_FLOOR,
};
use crate::types::Trend;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one journal owner.
///
/// Load with `JournalConfig::load()` which searches:
/// 1. `$ENERGY_INSIGHTS_CONFIG` env var
/// 2. `./journal_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Owner identification and timezone
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Sleep debt / fatigue accumulation policy
    #[serde(default)]
    pub sleep: SleepConfig,

    /// Intraday energy decay
    #[serde(default)]
    pub decay: DecayConfig,

    /// Signal simulator parameters
    #[serde(default)]
    pub signal: SignalConfig,

    /// Insight classification thresholds
    #[serde(default)]
    pub insights: InsightThresholds,
}

impl JournalConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ENERGY_INSIGHTS_CONFIG` environment variable
    /// 2. `./journal_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), profile = %config.profile.name, "Loaded journal config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(profile = %config.profile.name, "Loaded journal config from ./{CONFIG_FILE_NAME}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{CONFIG_FILE_NAME}, using defaults");
                }
            }
        }

        info!("No {CONFIG_FILE_NAME} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not fatal.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Journal config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Every number must be finite
    /// - Escalating thresholds must not be inverted
    /// - Rates and multipliers used to scale energy must be positive
    /// - Range checks from `validation::validate_ranges`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Sleep: the high-debt growth rate escalates the normal one, the
        // rested recovery rate escalates the normal one
        let s = &self.sleep;
        Self::check_escalation(
            s.fatigue_growth_rate,
            s.fatigue_growth_rate_high_debt,
            "sleep.fatigue_growth_rate",
            &mut errors,
        );
        Self::check_escalation(
            s.fatigue_recovery_rate,
            s.fatigue_recovery_rate_rested,
            "sleep.fatigue_recovery_rate",
            &mut errors,
        );
        Self::check_escalation(
            s.min_start_energy,
            s.base_start_energy,
            "sleep.start_energy",
            &mut errors,
        );
        if s.target_hours <= 0.0 {
            errors.push("sleep.target_hours must be > 0".to_string());
        }
        if s.high_debt_hours <= 0.0 {
            errors.push("sleep.high_debt_hours must be > 0".to_string());
        }
        if !(s.surplus_repayment_rate > 0.0 && s.surplus_repayment_rate <= 1.0) {
            errors.push(format!(
                "sleep.surplus_repayment_rate ({:.2}) must be in (0, 1]",
                s.surplus_repayment_rate
            ));
        }

        // Decay: a positive base rate keeps energy non-increasing over the day
        let d = &self.decay;
        if d.base_rate <= 0.0 {
            errors.push("decay.base_rate must be > 0".to_string());
        }
        if d.debt_rate < 0.0 {
            errors.push("decay.debt_rate must be >= 0".to_string());
        }
        if d.low_signal >= d.high_signal {
            errors.push(format!(
                "decay.low_signal ({:.1}) must be < high_signal ({:.1})",
                d.low_signal, d.high_signal
            ));
        }
        Self::check_escalation(
            d.moderate_fatigue,
            d.severe_fatigue,
            "decay.fatigue",
            &mut errors,
        );
        for (name, factor) in [
            ("decay.high_signal_factor", d.high_signal_factor),
            ("decay.low_signal_factor", d.low_signal_factor),
            ("decay.moderate_fatigue_factor", d.moderate_fatigue_factor),
            ("decay.severe_fatigue_factor", d.severe_fatigue_factor),
        ] {
            if factor <= 0.0 {
                errors.push(format!("{name} must be > 0"));
            }
        }

        // Signal
        let sig = &self.signal;
        if sig.days > MAX_SIMULATION_DAYS {
            errors.push(format!(
                "signal.days ({}) must be <= {MAX_SIMULATION_DAYS}",
                sig.days
            ));
        }
        if sig.variability < 0.0 {
            errors.push("signal.variability must be >= 0".to_string());
        }
        if sig.drift_per_day < 0.0 {
            errors.push("signal.drift_per_day must be >= 0 (trend sets the sign)".to_string());
        }

        // Insights: low <= high keeps the neutral band non-negative
        let i = &self.insights;
        Self::check_escalation(
            i.low_signal_threshold,
            i.high_signal_threshold,
            "insights.signal_threshold",
            &mut errors,
        );

        // Profile
        if self.profile.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            errors.push(format!(
                "profile.utc_offset_minutes ({}) must be within ±{MAX_UTC_OFFSET_MINUTES}",
                self.profile.utc_offset_minutes
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            for key in super::validation::non_finite_keys(&value, "") {
                errors.push(format!("{key} must be a finite number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_escalation(lower: f64, upper: f64, name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass, catch them explicitly
        if !lower.is_finite() || !upper.is_finite() {
            errors.push(format!(
                "{name}: values must be finite (got lower={lower}, upper={upper})"
            ));
            return;
        }
        if upper < lower {
            errors.push(format!(
                "{name}: upper ({upper:.3}) must be >= lower ({lower:.3})"
            ));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Profile
// ============================================================================

/// Owner metadata. `utc_offset_minutes` fixes the timezone used for
/// calendar-day keys and wake time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,

    /// Offset from UTC in minutes (e.g. -300 for UTC-5)
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_profile_name() -> String {
    "default".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            utc_offset_minutes: 0,
        }
    }
}

impl ProfileConfig {
    /// The owner's timezone. Falls back to UTC for out-of-range offsets.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

// ============================================================================
// Sleep Debt / Fatigue
// ============================================================================

/// Sleep debt and fatigue accumulation policy.
///
/// Surplus sleep repays debt at `surplus_repayment_rate`; the asymmetry
/// against shortfall (repaid 1:1 into debt) is part of the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Nightly sleep baseline (hours)
    #[serde(default = "default_target_hours")]
    pub target_hours: f64,

    /// Fraction of each surplus hour that repays debt
    #[serde(default = "default_surplus_repayment")]
    pub surplus_repayment_rate: f64,

    /// Fatigue added per hour of debt when debt grows
    #[serde(default = "default_fatigue_growth")]
    pub fatigue_growth_rate: f64,

    /// Fatigue added per hour of debt when debt grows past `high_debt_hours`
    #[serde(default = "default_fatigue_growth_high")]
    pub fatigue_growth_rate_high_debt: f64,

    /// Debt above which fatigue grows at the high-debt rate (hours)
    #[serde(default = "default_high_debt_hours")]
    pub high_debt_hours: f64,

    /// Fatigue recovered per hour slept when debt did not grow
    #[serde(default = "default_fatigue_recovery")]
    pub fatigue_recovery_rate: f64,

    /// Recovery rate when sleep exceeded the target
    #[serde(default = "default_fatigue_recovery_rested")]
    pub fatigue_recovery_rate_rested: f64,

    /// Starting energy of a fatigue-free day
    #[serde(default = "default_base_start_energy")]
    pub base_start_energy: f64,

    /// Floor for starting energy
    #[serde(default = "default_min_start_energy")]
    pub min_start_energy: f64,

    /// Starting energy lost per point of fatigue
    #[serde(default = "default_fatigue_start_penalty")]
    pub fatigue_start_penalty: f64,
}

const fn default_target_hours() -> f64 { 8.0 }
const fn default_surplus_repayment() -> f64 { 0.8 }
const fn default_fatigue_growth() -> f64 { 0.1 }
const fn default_fatigue_growth_high() -> f64 { 0.25 }
const fn default_high_debt_hours() -> f64 { 10.0 }
const fn default_fatigue_recovery() -> f64 { 0.2 }
const fn default_fatigue_recovery_rested() -> f64 { 0.4 }
const fn default_base_start_energy() -> f64 { 8.0 }
const fn default_min_start_energy() -> f64 { 3.0 }
const fn default_fatigue_start_penalty() -> f64 { 0.8 }

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            target_hours: default_target_hours(),
            surplus_repayment_rate: default_surplus_repayment(),
            fatigue_growth_rate: default_fatigue_growth(),
            fatigue_growth_rate_high_debt: default_fatigue_growth_high(),
            high_debt_hours: default_high_debt_hours(),
            fatigue_recovery_rate: default_fatigue_recovery(),
            fatigue_recovery_rate_rested: default_fatigue_recovery_rested(),
            base_start_energy: default_base_start_energy(),
            min_start_energy: default_min_start_energy(),
            fatigue_start_penalty: default_fatigue_start_penalty(),
        }
    }
}

// ============================================================================
// Energy Decay
// ============================================================================

/// Intraday decay constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Energy lost per waking hour with no debt
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,

    /// Extra hourly loss per 2 hours of debt
    #[serde(default = "default_debt_rate")]
    pub debt_rate: f64,

    /// Time of day energy starts draining ("HH:MM")
    #[serde(default = "default_wake_time", with = "hhmm")]
    pub wake_time: NaiveTime,

    /// Signal assumed when no sample exists for today
    #[serde(default = "default_signal_value")]
    pub default_signal: f64,

    /// Signal at or above which decay slows
    #[serde(default = "default_high_signal")]
    pub high_signal: f64,

    /// Signal below which decay speeds up
    #[serde(default = "default_low_signal")]
    pub low_signal: f64,

    #[serde(default = "default_high_signal_factor")]
    pub high_signal_factor: f64,

    #[serde(default = "default_low_signal_factor")]
    pub low_signal_factor: f64,

    /// Fatigue above which the moderate factor applies
    #[serde(default = "default_moderate_fatigue")]
    pub moderate_fatigue: f64,

    /// Fatigue above which the severe factor applies
    #[serde(default = "default_severe_fatigue")]
    pub severe_fatigue: f64,

    #[serde(default = "default_moderate_fatigue_factor")]
    pub moderate_fatigue_factor: f64,

    #[serde(default = "default_severe_fatigue_factor")]
    pub severe_fatigue_factor: f64,

    /// Energy removed up front per point of fatigue
    #[serde(default = "default_fatigue_energy_penalty")]
    pub fatigue_energy_penalty: f64,
}

const fn default_base_rate() -> f64 { 0.5 }
const fn default_debt_rate() -> f64 { 0.15 }
fn default_wake_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}
const fn default_signal_value() -> f64 { 65.0 }
const fn default_high_signal() -> f64 { 75.0 }
const fn default_low_signal() -> f64 { 50.0 }
const fn default_high_signal_factor() -> f64 { 0.7 }
const fn default_low_signal_factor() -> f64 { 1.3 }
const fn default_moderate_fatigue() -> f64 { 5.0 }
const fn default_severe_fatigue() -> f64 { 10.0 }
const fn default_moderate_fatigue_factor() -> f64 { 1.1 }
const fn default_severe_fatigue_factor() -> f64 { 1.2 }
const fn default_fatigue_energy_penalty() -> f64 { 0.15 }

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            debt_rate: default_debt_rate(),
            wake_time: default_wake_time(),
            default_signal: default_signal_value(),
            high_signal: default_high_signal(),
            low_signal: default_low_signal(),
            high_signal_factor: default_high_signal_factor(),
            low_signal_factor: default_low_signal_factor(),
            moderate_fatigue: default_moderate_fatigue(),
            severe_fatigue: default_severe_fatigue(),
            moderate_fatigue_factor: default_moderate_fatigue_factor(),
            severe_fatigue_factor: default_severe_fatigue_factor(),
            fatigue_energy_penalty: default_fatigue_energy_penalty(),
        }
    }
}

/// `NaiveTime` as "HH:MM" in TOML
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{raw}' (expected HH:MM): {e}")))
    }
}

// ============================================================================
// Signal Simulation
// ============================================================================

/// Random-walk parameters for the simulated daily signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Length of the series (days, ending today)
    #[serde(default = "default_signal_days")]
    pub days: u32,

    /// Starting value of the walk
    #[serde(default = "default_base_value")]
    pub base_value: f64,

    /// Maximum daily perturbation (uniform in ±variability)
    #[serde(default = "default_variability")]
    pub variability: f64,

    #[serde(default)]
    pub trend: Trend,

    /// Daily drift applied in the trend's direction
    #[serde(default = "default_drift")]
    pub drift_per_day: f64,
}

const fn default_signal_days() -> u32 { 30 }
const fn default_base_value() -> f64 { 60.0 }
const fn default_variability() -> f64 { 10.0 }
const fn default_drift() -> f64 { 0.3 }

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            days: default_signal_days(),
            base_value: default_base_value(),
            variability: default_variability(),
            trend: Trend::default(),
            drift_per_day: default_drift(),
        }
    }
}

impl SignalConfig {
    /// Whether `base_value` lies inside the simulator's clamp range.
    pub fn base_in_range(&self) -> bool {
        (SIGNAL_FLOOR..=SIGNAL_CEILING).contains(&self.base_value)
    }
}

// ============================================================================
// Insight Thresholds
// ============================================================================

/// Thresholds for turning aggregates into observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Boosting emotions averaging at or above this are called out
    #[serde(default = "default_high_threshold")]
    pub high_signal_threshold: f64,

    /// Draining emotions averaging at or below this are called out
    #[serde(default = "default_low_threshold")]
    pub low_signal_threshold: f64,

    /// Sleep debt above which the sleep status warns (hours)
    #[serde(default = "default_sleep_debt_warning")]
    pub sleep_debt_warning_hours: f64,

    /// Fatigue load above which the sleep status warns
    #[serde(default = "default_fatigue_warning")]
    pub fatigue_warning: f64,
}

const fn default_high_threshold() -> f64 { 70.0 }
const fn default_low_threshold() -> f64 { 55.0 }
const fn default_sleep_debt_warning() -> f64 { 4.0 }
const fn default_fatigue_warning() -> f64 { 5.0 }

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            high_signal_threshold: default_high_threshold(),
            low_signal_threshold: default_low_threshold(),
            sleep_debt_warning_hours: default_sleep_debt_warning(),
            fatigue_warning: default_fatigue_warning(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
