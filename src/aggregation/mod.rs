//! Aggregation Engine
//!
//! Groups journal entries by calendar day, week, month and weekday, and
//! relates tagged emotions to the daily signal. Calendar fields are read in
//! the owner's timezone, which is passed in rather than taken from the host.
//!
//! Periods without entries are absent from the output, never zero-filled.

mod correlation;
mod grouping;

pub use correlation::emotion_statistics;
pub use grouping::{day_key, month_key, week_key, week_start, RunningMean};

use chrono::{Datelike, NaiveDate, TimeZone};
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{AggregationReport, LogEntry, SignalSample};
use grouping::{accumulate, period_averages, weekday_averages};

/// Calendar day of each entry in `tz`, in feed order.
pub fn entry_dates<'a, Tz: TimeZone>(
    logs: &'a [LogEntry],
    tz: &Tz,
) -> Vec<(NaiveDate, &'a LogEntry)> {
    logs.iter()
        .map(|log| (log.timestamp.with_timezone(tz).date_naive(), log))
        .collect()
}

/// Build the full report for a log feed and a signal series.
pub fn aggregate<Tz: TimeZone>(
    logs: &[LogEntry],
    signals: &[SignalSample],
    tz: &Tz,
) -> AggregationReport {
    let dated = entry_dates(logs, tz);

    let mut by_day = BTreeMap::new();
    let mut by_week = BTreeMap::new();
    let mut by_month = BTreeMap::new();
    let mut by_weekday = BTreeMap::new();

    for (date, log) in &dated {
        let energy = f64::from(log.energy_delta);
        accumulate(&mut by_day, day_key(*date), energy);
        accumulate(&mut by_week, week_key(*date), energy);
        accumulate(&mut by_month, month_key(*date), energy);
        accumulate(
            &mut by_weekday,
            date.weekday().num_days_from_monday(),
            energy,
        );
    }

    let (emotion_frequency, emotion_correlation) = emotion_statistics(&dated, signals);

    debug!(
        entries = logs.len(),
        signal_days = signals.len(),
        days = by_day.len(),
        emotions = emotion_frequency.len(),
        "Aggregated journal"
    );

    AggregationReport {
        by_day: period_averages(by_day),
        by_week: period_averages(by_week),
        by_month: period_averages(by_month),
        by_weekday: weekday_averages(by_weekday),
        emotion_frequency,
        emotion_correlation,
    }
}
