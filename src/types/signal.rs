//! Simulated physiological signal: SignalSample, Trend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthetic daily reading (illustrative, never authoritative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub date: NaiveDate,
    /// Signal value, always within the simulator's floor/ceiling
    pub value: f64,
}

/// Long-run direction of the simulated signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    #[default]
    Stable,
    Improving,
    Declining,
}

impl Trend {
    /// Per-day drift multiplier: +1, 0 or -1.
    pub const fn direction(self) -> f64 {
        match self {
            Self::Stable => 0.0,
            Self::Improving => 1.0,
            Self::Declining => -1.0,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::Improving => write!(f, "improving"),
            Self::Declining => write!(f, "declining"),
        }
    }
}

impl std::str::FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stable" => Ok(Self::Stable),
            "improving" => Ok(Self::Improving),
            "declining" => Ok(Self::Declining),
            other => Err(format!(
                "unknown trend '{other}' (expected stable, improving or declining)"
            )),
        }
    }
}
