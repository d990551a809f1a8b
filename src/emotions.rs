//! Emotion vocabulary
//!
//! The journaling form offers a fixed set of emotions split into
//! energy-boosting and energy-draining groups. Insight rules only praise
//! boosting emotions and only warn about draining ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Energy-boosting emotions offered by the journaling form
pub const BOOSTING_EMOTIONS: &[&str] = &[
    "Joy", "Gratitude", "Love", "Pride", "Excitement", "Relief", "Contentment",
    "Hope", "Amusement", "Confidence", "Inspired", "Optimism", "Compassion",
];

/// Energy-draining emotions offered by the journaling form
pub const DRAINING_EMOTIONS: &[&str] = &[
    "Anger", "Frustration", "Fear", "Sadness", "Guilt", "Shame", "Loneliness",
    "Disgust", "Jealousy", "Regret", "Anxious", "Overwhelmed", "Resentment", "Hopelessness",
];

/// Which group an emotion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Boosting,
    Draining,
}

/// Boosting / draining partition used by validation and insight rules.
///
/// A name listed in both sets counts as boosting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionClassification {
    pub boosting: BTreeSet<String>,
    pub draining: BTreeSet<String>,
}

impl EmotionClassification {
    pub fn new<B, D, S>(boosting: B, draining: D) -> Self
    where
        B: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            boosting: boosting.into_iter().map(Into::into).collect(),
            draining: draining.into_iter().map(Into::into).collect(),
        }
    }

    /// The form's built-in vocabulary.
    pub fn default_vocabulary() -> Self {
        Self::new(
            BOOSTING_EMOTIONS.iter().copied(),
            DRAINING_EMOTIONS.iter().copied(),
        )
    }

    pub fn classify(&self, emotion: &str) -> Option<EmotionCategory> {
        if self.boosting.contains(emotion) {
            Some(EmotionCategory::Boosting)
        } else if self.draining.contains(emotion) {
            Some(EmotionCategory::Draining)
        } else {
            None
        }
    }

    pub fn is_boosting(&self, emotion: &str) -> bool {
        self.boosting.contains(emotion)
    }

    pub fn is_draining(&self, emotion: &str) -> bool {
        self.draining.contains(emotion)
    }

    pub fn contains(&self, emotion: &str) -> bool {
        self.classify(emotion).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_sizes() {
        let vocab = EmotionClassification::default_vocabulary();
        assert_eq!(vocab.boosting.len(), 13);
        assert_eq!(vocab.draining.len(), 14);
        assert!(vocab.boosting.is_disjoint(&vocab.draining));
    }

    #[test]
    fn test_classify() {
        let vocab = EmotionClassification::default_vocabulary();
        assert_eq!(vocab.classify("Joy"), Some(EmotionCategory::Boosting));
        assert_eq!(vocab.classify("Anxious"), Some(EmotionCategory::Draining));
        assert_eq!(vocab.classify("joy"), None, "Lookup is case-sensitive");
    }

    #[test]
    fn test_custom_partition() {
        let vocab = EmotionClassification::new(["Calm"], ["Tired"]);
        assert!(vocab.is_boosting("Calm"));
        assert!(vocab.is_draining("Tired"));
        assert!(!vocab.contains("Joy"));
    }
}
