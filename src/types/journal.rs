//! Journal entry types: LogEntry, EntryError, journal_limits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emotions::EmotionClassification;

/// Input bounds enforced by the journaling form
pub mod journal_limits {
    /// Lowest self-reported energy change
    pub const MIN_ENERGY_DELTA: i32 = -10;
    /// Highest self-reported energy change
    pub const MAX_ENERGY_DELTA: i32 = 10;
    /// Minimum emotion tags per entry
    pub const MIN_EMOTIONS: usize = 1;
    /// Maximum emotion tags per entry
    pub const MAX_EMOTIONS: usize = 2;
    /// Lowest sleep duration accepted alongside an entry (hours)
    pub const MIN_SLEEP_HOURS: f64 = 0.0;
    /// Highest sleep duration accepted alongside an entry (hours)
    pub const MAX_SLEEP_HOURS: f64 = 12.0;
}

use journal_limits::{
    MAX_EMOTIONS, MAX_ENERGY_DELTA, MAX_SLEEP_HOURS, MIN_EMOTIONS, MIN_ENERGY_DELTA,
    MIN_SLEEP_HOURS,
};

// ============================================================================
// Log Entry
// ============================================================================

/// One journaled moment.
///
/// Entries are supplied by the host after retrieval; the core never mutates
/// them. `sleep_hours` describes the night before the entry, not the moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Self-reported energy change (-10..=10)
    pub energy_delta: i32,
    /// Free-text situation, e.g. "Work Meeting"
    #[serde(default)]
    pub situation: String,
    /// Optional trigger, e.g. "Boss"
    #[serde(default)]
    pub trigger: Option<String>,
    /// One or two emotion tags, in the order the user picked them
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Hours slept the night before
    #[serde(default = "default_sleep_hours")]
    pub sleep_hours: f64,
    /// Instant the entry was created
    pub timestamp: DateTime<Utc>,
}

const fn default_sleep_hours() -> f64 {
    8.0
}

impl LogEntry {
    /// Entry with the given energy and emotions, no situation, 8h of sleep.
    pub fn new<S: Into<String>>(
        energy_delta: i32,
        emotions: impl IntoIterator<Item = S>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            energy_delta,
            situation: String::new(),
            trigger: None,
            emotions: emotions.into_iter().map(Into::into).collect(),
            sleep_hours: default_sleep_hours(),
            timestamp,
        }
    }

    /// Check the entry against the journaling form's constraints.
    ///
    /// Aggregation accepts entries that fail this check; hosts call it before
    /// writing a new or edited entry.
    pub fn validate(&self, vocabulary: &EmotionClassification) -> Result<(), EntryError> {
        if !(MIN_ENERGY_DELTA..=MAX_ENERGY_DELTA).contains(&self.energy_delta) {
            return Err(EntryError::EnergyOutOfRange(self.energy_delta));
        }

        if !(MIN_EMOTIONS..=MAX_EMOTIONS).contains(&self.emotions.len()) {
            return Err(EntryError::EmotionCount(self.emotions.len()));
        }
        if let Some(unknown) = self.emotions.iter().find(|e| !vocabulary.contains(e)) {
            return Err(EntryError::UnknownEmotion(unknown.clone()));
        }
        if self.emotions.len() == 2 && self.emotions[0] == self.emotions[1] {
            return Err(EntryError::DuplicateEmotion(self.emotions[0].clone()));
        }

        if !self.sleep_hours.is_finite()
            || !(MIN_SLEEP_HOURS..=MAX_SLEEP_HOURS).contains(&self.sleep_hours)
        {
            return Err(EntryError::SleepOutOfRange(self.sleep_hours));
        }

        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Energy delta {0} is outside -10..=10")]
    EnergyOutOfRange(i32),

    #[error("Expected 1-2 emotions, got {0}")]
    EmotionCount(usize),

    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("Emotion tagged twice: {0}")]
    DuplicateEmotion(String),

    #[error("Sleep hours {0} is outside 0..=12")]
    SleepOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(energy: i32, emotions: &[&str]) -> LogEntry {
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
        LogEntry::new(energy, emotions.iter().copied(), ts)
    }

    #[test]
    fn test_valid_entry_passes() {
        let vocab = EmotionClassification::default_vocabulary();
        assert!(entry(6, &["Joy"]).validate(&vocab).is_ok());
        assert!(entry(-10, &["Anger", "Fear"]).validate(&vocab).is_ok());
    }

    #[test]
    fn test_energy_out_of_range_rejected() {
        let vocab = EmotionClassification::default_vocabulary();
        assert_eq!(
            entry(11, &["Joy"]).validate(&vocab),
            Err(EntryError::EnergyOutOfRange(11))
        );
    }

    #[test]
    fn test_emotion_count_enforced() {
        let vocab = EmotionClassification::default_vocabulary();
        assert_eq!(entry(1, &[]).validate(&vocab), Err(EntryError::EmotionCount(0)));
        assert_eq!(
            entry(1, &["Joy", "Love", "Hope"]).validate(&vocab),
            Err(EntryError::EmotionCount(3))
        );
    }

    #[test]
    fn test_unknown_and_duplicate_emotions_rejected() {
        let vocab = EmotionClassification::default_vocabulary();
        assert_eq!(
            entry(1, &["Joy", "Bored"]).validate(&vocab),
            Err(EntryError::UnknownEmotion("Bored".to_string()))
        );
        assert_eq!(
            entry(1, &["Joy", "Joy"]).validate(&vocab),
            Err(EntryError::DuplicateEmotion("Joy".to_string()))
        );
    }

    #[test]
    fn test_sleep_hours_bounds() {
        let vocab = EmotionClassification::default_vocabulary();
        let mut e = entry(0, &["Relief"]);
        e.sleep_hours = 12.5;
        assert_eq!(e.validate(&vocab), Err(EntryError::SleepOutOfRange(12.5)));
        e.sleep_hours = f64::NAN;
        assert!(e.validate(&vocab).is_err());
        e.sleep_hours = 0.0;
        assert!(e.validate(&vocab).is_ok());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"energy_delta": 3, "timestamp": "2025-03-04T09:30:00Z"}"#;
        let e: LogEntry = serde_json::from_str(json).unwrap();
        assert!(e.emotions.is_empty());
        assert!(e.trigger.is_none());
        assert_eq!(e.sleep_hours, 8.0);
    }
}
