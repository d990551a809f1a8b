//! Journal Configuration Module
//!
//! Provides the metric constants loaded from TOML files, so sleep policy,
//! decay tuning and insight thresholds can be tuned per journal owner.
//!
//! ## Loading Order
//!
//! 1. `ENERGY_INSIGHTS_CONFIG` environment variable (path to TOML file)
//! 2. `journal_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Library functions take the config sections they need as arguments.
//! Binaries install one process-wide copy at startup:
//!
//! ```ignore
//! config::init(JournalConfig::load());
//! let wake = config::get().decay.wake_time;
//! ```

mod journal_config;
pub mod defaults;
pub mod validation;

pub use journal_config::*;

use std::sync::OnceLock;

/// Global journal configuration, initialized once at startup.
static JOURNAL_CONFIG: OnceLock<JournalConfig> = OnceLock::new();

/// Initialize the global journal configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: JournalConfig) {
    if JOURNAL_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global journal configuration.
///
/// Falls back to built-in defaults when `init()` was never called.
pub fn get() -> &'static JournalConfig {
    JOURNAL_CONFIG.get_or_init(|| {
        tracing::warn!("config::get() called before config::init(), using defaults");
        JournalConfig::default()
    })
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    JOURNAL_CONFIG.get().is_some()
}
