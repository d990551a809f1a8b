//! Aggregation outputs: PeriodAverage, WeekdayAverage, EmotionFrequency,
//! EmotionCorrelation, AggregationReport

use chrono::Weekday;
use serde::{Deserialize, Serialize};

// ============================================================================
// Energy Averages
// ============================================================================

/// Mean energy for one day, week or month bucket.
///
/// `period` is the grouping key: `YYYY-MM-DD` for days, the week's Sunday as
/// `YYYY-MM-DD` for weeks, `YYYY-MM` for months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAverage {
    pub period: String,
    pub avg_energy: f64,
    /// Number of entries in the bucket (always >= 1)
    pub entries: usize,
}

/// Mean energy for one weekday across the whole feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    #[serde(with = "full_weekday")]
    pub weekday: Weekday,
    pub avg_energy: f64,
    pub entries: usize,
}

/// Full English weekday name ("Monday" .. "Sunday")
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

mod full_weekday {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(d)?;
        name.parse::<Weekday>()
            .map_err(|_| serde::de::Error::custom(format!("invalid weekday: {name}")))
    }
}

// ============================================================================
// Emotion Statistics
// ============================================================================

/// How often an emotion was tagged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionFrequency {
    pub emotion: String,
    pub count: usize,
}

/// Average share of the daily signal attributed to one emotion.
///
/// `average_signal` is `None` when none of the emotion's entries fell on a
/// day with a signal sample. Consumers must treat that as "no data", not as
/// a low reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCorrelation {
    pub emotion: String,
    pub average_signal: Option<f64>,
    /// Contributing entries (entries on days without a sample are not counted)
    pub samples: usize,
}

// ============================================================================
// Aggregation Report
// ============================================================================

/// Everything the aggregation engine derives from one log feed snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub by_day: Vec<PeriodAverage>,
    pub by_week: Vec<PeriodAverage>,
    pub by_month: Vec<PeriodAverage>,
    /// Monday first; weekdays without entries are absent
    pub by_weekday: Vec<WeekdayAverage>,
    /// First-appearance order
    pub emotion_frequency: Vec<EmotionFrequency>,
    /// First-appearance order
    pub emotion_correlation: Vec<EmotionCorrelation>,
}
