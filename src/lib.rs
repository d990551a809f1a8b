//! Energy Insights: derived metrics for an energy and mood journal
//!
//! Pure computations over a journal snapshot. The host application owns
//! storage, authentication and presentation; this crate consumes a log-entry
//! feed and a daily sleep record and produces aggregates, insight strings
//! and a current-energy estimate.
//!
//! ## Components
//!
//! - **Signal Simulator**: seeded random walk standing in for a wearable metric
//! - **Sleep/Fatigue Accumulator**: rolls sleep debt and fatigue forward per day
//! - **Energy Decay Function**: current energy from time awake, debt and signal
//! - **Aggregation Engine**: day/week/month/weekday means, emotion correlation
//! - **Insight Generator**: threshold rules over the correlations
//!
//! [`pipeline::refresh`] runs all of them for one dashboard update.

pub mod aggregation;
pub mod config;
pub mod decay;
pub mod emotions;
pub mod insights;
pub mod pipeline;
pub mod simulation;
pub mod sleep;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, JournalConfig};

// Re-export commonly used types
pub use types::{
    AggregationReport, DailyState, EmotionCorrelation, EmotionFrequency, EntryError, LogEntry,
    PeriodAverage, SignalSample, Trend, WeekdayAverage,
};

// Re-export the computation entry points
pub use aggregation::aggregate;
pub use decay::{decay, energy_percent, hours_awake, DecayInput};
pub use emotions::{EmotionCategory, EmotionClassification};
pub use insights::{generate_insights, weekday_insights};
pub use pipeline::{refresh, DashboardSnapshot, RefreshInput};
pub use simulation::simulate;
pub use sleep::{update_daily, SleepStatus};
