//! Sleep/Fatigue Accumulator
//!
//! Rolls yesterday's sleep debt and fatigue forward with tonight's sleep:
//! - Short sleep adds the full shortfall to the debt
//! - Surplus sleep repays debt at a reduced rate
//! - Fatigue grows with the debt while the debt grows, and recovers with
//!   sleep otherwise
//! - Starting energy drops with fatigue, never below a floor

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::defaults::FATIGUE_LOAD_CEILING;
use crate::config::{InsightThresholds, SleepConfig};
use crate::types::DailyState;

/// Compute today's state from the previous record and last night's sleep.
///
/// A missing previous record means no debt and no fatigue. Negative
/// previous values are treated as zero.
pub fn update_daily(
    previous: Option<&DailyState>,
    sleep_hours_tonight: f64,
    cfg: &SleepConfig,
) -> DailyState {
    let (prev_deficit, prev_fatigue) = previous
        .map_or((0.0, 0.0), |p| (p.deficit.max(0.0), p.fatigue_load.max(0.0)));

    let deficit = if sleep_hours_tonight < cfg.target_hours {
        prev_deficit + (cfg.target_hours - sleep_hours_tonight)
    } else {
        let surplus = sleep_hours_tonight - cfg.target_hours;
        (prev_deficit - surplus * cfg.surplus_repayment_rate).max(0.0)
    };

    let fatigue = if deficit > prev_deficit {
        let growth = if deficit > cfg.high_debt_hours {
            cfg.fatigue_growth_rate_high_debt
        } else {
            cfg.fatigue_growth_rate
        };
        prev_fatigue + deficit * growth
    } else {
        let recovery = if sleep_hours_tonight > cfg.target_hours {
            cfg.fatigue_recovery_rate_rested
        } else {
            cfg.fatigue_recovery_rate
        };
        (prev_fatigue - sleep_hours_tonight * recovery).max(0.0)
    };
    let fatigue_load = fatigue.clamp(0.0, FATIGUE_LOAD_CEILING);

    let start_energy = cfg
        .min_start_energy
        .max(cfg.base_start_energy - fatigue_load * cfg.fatigue_start_penalty);

    debug!(
        sleep_hours = sleep_hours_tonight,
        deficit,
        fatigue_load,
        start_energy,
        "Daily sleep state updated"
    );

    DailyState {
        sleep_hours: sleep_hours_tonight,
        deficit,
        fatigue_load,
        start_energy,
    }
}

// ============================================================================
// Sleep Status
// ============================================================================

/// Warning flags for the sleep and fatigue overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStatus {
    pub high_sleep_debt: bool,
    pub chronic_fatigue: bool,
}

impl SleepStatus {
    pub fn assess(state: &DailyState, thresholds: &InsightThresholds) -> Self {
        Self {
            high_sleep_debt: state.deficit > thresholds.sleep_debt_warning_hours,
            chronic_fatigue: state.fatigue_load > thresholds.fatigue_warning,
        }
    }

    /// One line about debt, one about fatigue.
    pub fn messages(&self) -> [&'static str; 2] {
        let debt = if self.high_sleep_debt {
            "🚨 High Sleep Debt! Your energy will drain faster."
        } else {
            "✅ Sleep levels are within a healthy range."
        };
        let fatigue = if self.chronic_fatigue {
            "⚠️ Chronic fatigue detected. Long-term recovery is needed."
        } else {
            "💪 You're managing fatigue well!"
        };
        [debt, fatigue]
    }
}
