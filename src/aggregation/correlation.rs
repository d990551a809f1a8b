//! Emotion frequency and emotion-to-signal correlation
//!
//! Each entry's day signal is split evenly among the emotions tagged on it:
//! two emotions on a day with signal 90 each receive 45. An emotion's
//! average is the mean of the shares it received. Entries on days without a
//! sample add no share at all, so an emotion seen only on such days has no
//! average (`None`), which is different from an average of zero.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::grouping::RunningMean;
use crate::types::{EmotionCorrelation, EmotionFrequency, LogEntry, SignalSample};

/// Per-emotion accumulator, kept in first-appearance order
#[derive(Debug)]
struct EmotionTally<'a> {
    emotion: &'a str,
    count: usize,
    shares: Option<RunningMean>,
}

/// Frequency and signal correlation for every emotion in the feed.
///
/// `dated` pairs each entry with its calendar day in the owner's timezone.
/// When `signals` holds two samples for one day the later one wins.
pub fn emotion_statistics(
    dated: &[(NaiveDate, &LogEntry)],
    signals: &[SignalSample],
) -> (Vec<EmotionFrequency>, Vec<EmotionCorrelation>) {
    let signal_by_day: HashMap<NaiveDate, f64> =
        signals.iter().map(|s| (s.date, s.value)).collect();

    let mut tallies: Vec<EmotionTally<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (date, log) in dated {
        if log.emotions.is_empty() {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let share = signal_by_day
            .get(date)
            .map(|value| value / log.emotions.len() as f64);

        for emotion in &log.emotions {
            let idx = *index.entry(emotion.as_str()).or_insert_with(|| {
                tallies.push(EmotionTally {
                    emotion: emotion.as_str(),
                    count: 0,
                    shares: None,
                });
                tallies.len() - 1
            });

            let tally = &mut tallies[idx];
            tally.count += 1;
            if let Some(share) = share {
                match tally.shares.as_mut() {
                    Some(mean) => mean.push(share),
                    None => tally.shares = Some(RunningMean::first(share)),
                }
            }
        }
    }

    let frequency = tallies
        .iter()
        .map(|t| EmotionFrequency {
            emotion: t.emotion.to_string(),
            count: t.count,
        })
        .collect();

    let correlation = tallies
        .iter()
        .map(|t| EmotionCorrelation {
            emotion: t.emotion.to_string(),
            average_signal: t.shares.map(|m| m.mean()),
            samples: t.shares.map_or(0, |m| m.count()),
        })
        .collect();

    (frequency, correlation)
}
