//! Insight Generator
//!
//! Turns aggregated correlations and weekday averages into short
//! human-readable observations.

use tracing::debug;

use crate::config::InsightThresholds;
use crate::emotions::EmotionClassification;
use crate::types::{weekday_name, EmotionCorrelation, WeekdayAverage};

/// Shown when no emotion clears either threshold
pub const NEUTRAL_INSIGHT: &str =
    "ℹ️ No clear link between your emotions and your variability signal yet. Keep logging!";

/// Emotion observations, positive first, then negative.
///
/// An emotion is positive when it is boosting and its average signal is at
/// or above the high threshold, and negative when it is draining and at or
/// below the low threshold. A boosting emotion scoring low, a draining one
/// scoring high, anything between the thresholds and anything without an
/// average are left out. The neutral line appears only when both lists
/// are empty.
pub fn generate_insights(
    correlations: &[EmotionCorrelation],
    classification: &EmotionClassification,
    thresholds: &InsightThresholds,
) -> Vec<String> {
    let mut positive: Vec<&str> = Vec::new();
    let mut negative: Vec<&str> = Vec::new();

    for c in correlations {
        let Some(avg) = c.average_signal else {
            continue;
        };
        if avg >= thresholds.high_signal_threshold && classification.is_boosting(&c.emotion) {
            positive.push(&c.emotion);
        } else if avg <= thresholds.low_signal_threshold
            && classification.is_draining(&c.emotion)
        {
            negative.push(&c.emotion);
        }
    }

    debug!(
        positive = positive.len(),
        negative = negative.len(),
        "Classified emotion correlations"
    );

    let mut insights = Vec::with_capacity(2);
    if !positive.is_empty() {
        insights.push(format!(
            "✅ Positive Emotions ({}) tend to show up on days with a higher variability signal.",
            positive.join(", ")
        ));
    }
    if !negative.is_empty() {
        insights.push(format!(
            "⚠️ Negative Emotions ({}) tend to show up on days with a lower variability signal.",
            negative.join(", ")
        ));
    }
    if insights.is_empty() {
        insights.push(NEUTRAL_INSIGHT.to_string());
    }
    insights
}

/// One line per weekday with entries, e.g. `Monday: You tend to feel energized (+2.5)`.
pub fn weekday_insights(by_weekday: &[WeekdayAverage]) -> Vec<String> {
    by_weekday
        .iter()
        .map(|w| {
            let day = weekday_name(w.weekday);
            if w.avg_energy > 0.0 {
                format!("{day}: You tend to feel energized (+{:.1})", w.avg_energy)
            } else {
                format!("{day}: You tend to feel drained ({:.1})", w.avg_energy)
            }
        })
        .collect()
}
