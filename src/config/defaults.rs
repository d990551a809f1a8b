//! System-wide default constants.
//!
//! Hard bounds that are part of the metric definitions rather than tunable
//! policy. Grouped by subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ENERGY_INSIGHTS_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const CONFIG_FILE_NAME: &str = "journal_config.toml";

// ============================================================================
// Sleep / Fatigue
// ============================================================================

/// Upper bound of the chronic fatigue score.
///
/// Both the accumulator and the decay function clamp into `[0, 20]`.
pub const FATIGUE_LOAD_CEILING: f64 = 20.0;

// ============================================================================
// Signal Simulation
// ============================================================================

/// Lowest value the simulated signal can take.
pub const SIGNAL_FLOOR: f64 = 20.0;

/// Highest value the simulated signal can take.
pub const SIGNAL_CEILING: f64 = 120.0;

/// Longest series the simulator will be configured for (days). 3 650 = ~10 years.
pub const MAX_SIMULATION_DAYS: u32 = 3_650;

// ============================================================================
// Profile
// ============================================================================

/// Largest UTC offset accepted for the journal owner's timezone (minutes).
///
/// 840 = UTC+14, the furthest real-world offset.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 840;
