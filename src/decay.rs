//! Energy Decay Function
//!
//! Estimates the energy left at a given moment from the day's starting
//! energy, the accumulated sleep debt and fatigue, and today's signal.
//!
//! `rate = base_rate + (deficit / 2) * debt_rate`, scaled first by the signal
//! modifier (slower when the signal is high, faster when low) and then by the
//! fatigue modifier. Energy drains linearly from wake time at that rate.
//!
//! Time is always injected; nothing here reads the system clock.

use chrono::{DateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::config::defaults::FATIGUE_LOAD_CEILING;
use crate::config::DecayConfig;
use crate::types::DailyState;

/// Everything the decay needs besides the clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayInput {
    pub start_energy: f64,
    pub deficit: f64,
    pub fatigue_load: f64,
    pub today_signal: f64,
}

impl DecayInput {
    /// Inputs from a daily record with the configured default signal.
    pub fn from_daily(state: &DailyState, cfg: &DecayConfig) -> Self {
        Self {
            start_energy: state.start_energy,
            deficit: state.deficit,
            fatigue_load: state.fatigue_load,
            today_signal: cfg.default_signal,
        }
    }

    #[must_use]
    pub const fn with_signal(mut self, today_signal: f64) -> Self {
        self.today_signal = today_signal;
        self
    }
}

/// Hours between today's wake time and `now`, zero before waking.
///
/// "Today" and the wake time are read in `now`'s own timezone.
pub fn hours_awake<Tz: TimeZone>(now: &DateTime<Tz>, wake_time: NaiveTime) -> f64 {
    let local = now.naive_local();
    let woke = local.date().and_time(wake_time);
    let elapsed = local.signed_duration_since(woke);
    #[allow(clippy::cast_precision_loss)]
    let hours = elapsed.num_milliseconds() as f64 / 3_600_000.0;
    hours.max(0.0)
}

/// Hourly energy loss for the given debt, fatigue and signal.
pub fn decay_rate(deficit: f64, fatigue_load: f64, today_signal: f64, cfg: &DecayConfig) -> f64 {
    let mut rate = cfg.base_rate + (deficit / 2.0) * cfg.debt_rate;

    if today_signal >= cfg.high_signal {
        rate *= cfg.high_signal_factor;
    } else if today_signal < cfg.low_signal {
        rate *= cfg.low_signal_factor;
    }

    if fatigue_load > cfg.severe_fatigue {
        rate *= cfg.severe_fatigue_factor;
    } else if fatigue_load > cfg.moderate_fatigue {
        rate *= cfg.moderate_fatigue_factor;
    }

    rate
}

/// Current energy at `now`. Never negative, never an error.
///
/// Deficit is clamped to `>= 0` and fatigue to `[0, 20]` before use.
pub fn decay<Tz: TimeZone>(
    input: &DecayInput,
    now: &DateTime<Tz>,
    wake_time: NaiveTime,
    cfg: &DecayConfig,
) -> f64 {
    let deficit = input.deficit.max(0.0);
    let fatigue = input.fatigue_load.clamp(0.0, FATIGUE_LOAD_CEILING);

    let rate = decay_rate(deficit, fatigue, input.today_signal, cfg);
    let adjusted = input.start_energy - fatigue * cfg.fatigue_energy_penalty;

    (adjusted - hours_awake(now, wake_time) * rate).max(0.0)
}

/// Current energy as a 0-100 share of a fully rested starting energy.
pub fn energy_percent(current: f64, base_start_energy: f64) -> f64 {
    if base_start_energy <= 0.0 {
        return 0.0;
    }
    (current / base_start_energy * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, h, m, 0).unwrap()
    }

    fn seven() -> NaiveTime {
        NaiveTime::from_hms_opt(7, 0, 0).unwrap()
    }

    fn input(start: f64, deficit: f64, fatigue: f64, signal: f64) -> DecayInput {
        DecayInput {
            start_energy: start,
            deficit,
            fatigue_load: fatigue,
            today_signal: signal,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_hours_awake() {
        assert_eq!(hours_awake(&at(6, 0), seven()), 0.0);
        assert_eq!(hours_awake(&at(7, 0), seven()), 0.0);
        assert!(approx(hours_awake(&at(9, 30), seven()), 2.5));
    }

    #[test]
    fn test_hours_awake_uses_local_time() {
        // 12:00 UTC is 07:00 at UTC-5
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = at(12, 0).with_timezone(&tz);
        assert_eq!(hours_awake(&now, seven()), 0.0);
        let later = at(15, 0).with_timezone(&tz);
        assert!(approx(hours_awake(&later, seven()), 3.0));
    }

    #[test]
    fn test_rested_default_signal() {
        let cfg = DecayConfig::default();
        // 4 hours awake at 0.5/h
        let e = decay(&input(8.0, 0.0, 0.0, 65.0), &at(11, 0), seven(), &cfg);
        assert!(approx(e, 6.0));
    }

    #[test]
    fn test_debt_and_modifiers_compose() {
        let cfg = DecayConfig::default();
        // rate = (0.5 + 2 * 0.15) * 1.3 * 1.1 = 1.144
        let rate = decay_rate(4.0, 6.0, 40.0, &cfg);
        assert!(approx(rate, 0.8 * 1.3 * 1.1));

        // adjusted = 7 - 6 * 0.15 = 6.1; 2 hours -> 6.1 - 2.288
        let e = decay(&input(7.0, 4.0, 6.0, 40.0), &at(9, 0), seven(), &cfg);
        assert!(approx(e, 6.1 - 2.0 * 0.8 * 1.3 * 1.1));
    }

    #[test]
    fn test_high_signal_and_severe_fatigue() {
        let cfg = DecayConfig::default();
        let rate = decay_rate(0.0, 12.0, 75.0, &cfg);
        assert!(approx(rate, 0.5 * 0.7 * 1.2));
        // Boundaries: signal exactly 50 is unchanged, fatigue exactly 5 too
        assert!(approx(decay_rate(0.0, 5.0, 50.0, &cfg), 0.5));
    }

    #[test]
    fn test_never_negative() {
        let cfg = DecayConfig::default();
        let e = decay(&input(3.0, 30.0, 20.0, 20.0), &at(23, 59), seven(), &cfg);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let cfg = DecayConfig::default();
        let clamped = decay(&input(8.0, 0.0, 20.0, 65.0), &at(8, 0), seven(), &cfg);
        let wild = decay(&input(8.0, -5.0, 45.0, 65.0), &at(8, 0), seven(), &cfg);
        assert!(approx(clamped, wild));
    }

    #[test]
    fn test_monotonically_non_increasing_through_the_day() {
        let cfg = DecayConfig::default();
        for inp in [
            input(8.0, 0.0, 0.0, 65.0),
            input(6.5, 7.0, 8.0, 45.0),
            input(3.0, 20.0, 20.0, 110.0),
        ] {
            let mut last = f64::INFINITY;
            for minutes in (0..24 * 60).step_by(15) {
                let now = at(minutes / 60, minutes % 60);
                let e = decay(&inp, &now, seven(), &cfg);
                assert!(e >= 0.0);
                assert!(e <= last, "energy rose at {now}: {e} > {last}");
                last = e;
            }
        }
    }

    #[test]
    fn test_from_daily_uses_default_signal() {
        let cfg = DecayConfig::default();
        let state = DailyState::default();
        let inp = DecayInput::from_daily(&state, &cfg);
        assert_eq!(inp.today_signal, 65.0);
        assert_eq!(inp.with_signal(80.0).today_signal, 80.0);
    }

    #[test]
    fn test_energy_percent() {
        assert_eq!(energy_percent(4.0, 8.0), 50.0);
        assert_eq!(energy_percent(12.0, 8.0), 100.0);
        assert_eq!(energy_percent(-1.0, 8.0), 0.0);
        assert_eq!(energy_percent(4.0, 0.0), 0.0);
    }
}
