//! Period keys and running means for energy averages

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::types::{PeriodAverage, WeekdayAverage};

/// Arithmetic mean over a non-empty group.
///
/// Only constructible from a first value, so the count is never zero and
/// `mean()` never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningMean {
    total: f64,
    count: usize,
}

impl RunningMean {
    pub const fn first(value: f64) -> Self {
        Self {
            total: value,
            count: 1,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        assert!(self.count > 0, "RunningMean with an empty group");
        self.total / self.count as f64
    }

    pub const fn count(&self) -> usize {
        self.count
    }
}

/// Add `value` to the group under `key`, creating the group on first use.
pub fn accumulate<K: Ord>(groups: &mut BTreeMap<K, RunningMean>, key: K, value: f64) {
    groups
        .entry(key)
        .and_modify(|m| m.push(value))
        .or_insert_with(|| RunningMean::first(value));
}

// ============================================================================
// Keys
// ============================================================================

/// `YYYY-MM-DD`
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The Sunday starting `date`'s week, as `YYYY-MM-DD`
pub fn week_key(date: NaiveDate) -> String {
    day_key(week_start(date))
}

/// `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

// ============================================================================
// Finishing
// ============================================================================

/// Sorted period averages from string-keyed groups.
pub fn period_averages(groups: BTreeMap<String, RunningMean>) -> Vec<PeriodAverage> {
    groups
        .into_iter()
        .map(|(period, m)| PeriodAverage {
            period,
            avg_energy: m.mean(),
            entries: m.count(),
        })
        .collect()
}

/// Weekday averages, Monday first.
pub fn weekday_averages(groups: BTreeMap<u32, RunningMean>) -> Vec<WeekdayAverage> {
    groups
        .into_iter()
        .filter_map(|(idx, m)| {
            weekday_from_monday(idx).map(|weekday| WeekdayAverage {
                weekday,
                avg_energy: m.mean(),
                entries: m.count(),
            })
        })
        .collect()
}

const fn weekday_from_monday(idx: u32) -> Option<Weekday> {
    match idx {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}
