//! Per-day sleep state: DailyState

use serde::{Deserialize, Serialize};

/// One record per calendar day.
///
/// Produced by [`crate::sleep::update_daily`] when sleep is logged and read by
/// the decay function for the rest of the day. The host persists it keyed by
/// the calendar day it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyState {
    /// Hours slept entering the day
    pub sleep_hours: f64,
    /// Accumulated sleep debt in hours (>= 0)
    pub deficit: f64,
    /// Chronic fatigue score (0..=20)
    pub fatigue_load: f64,
    /// Starting energy for the day (>= 3)
    pub start_energy: f64,
}

impl Default for DailyState {
    /// A fully rested day: no debt, no fatigue, full starting energy.
    fn default() -> Self {
        Self {
            sleep_hours: 8.0,
            deficit: 0.0,
            fatigue_load: 0.0,
            start_energy: 8.0,
        }
    }
}
