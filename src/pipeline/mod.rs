//! Refresh Pipeline
//!
//! Recomputes every derived metric from a snapshot of the journal:
//!
//! ```text
//! STEP 1: Aggregate entries by day/week/month/weekday, correlate emotions
//! STEP 2: Emotion insights and weekday insights
//! STEP 3: Sleep status from the latest daily record
//! STEP 4: Current energy from the decay function at `now`
//! ```
//!
//! Nothing is cached between calls. The host owns persistence and decides
//! when to refresh.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregation::aggregate;
use crate::config::JournalConfig;
use crate::decay::{decay, energy_percent, DecayInput};
use crate::emotions::EmotionClassification;
use crate::insights::{generate_insights, weekday_insights};
use crate::simulation::value_on;
use crate::sleep::SleepStatus;
use crate::types::{AggregationReport, DailyState, LogEntry, SignalSample};

/// One refresh request from the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshInput {
    pub logs: Vec<LogEntry>,
    /// Latest daily record; `None` reads as a fully rested day
    pub daily_state: Option<DailyState>,
    pub signals: Vec<SignalSample>,
    /// The moment to evaluate current energy at
    pub now: DateTime<Utc>,
}

/// Everything the dashboard renders after a refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Calendar day of `now` in the profile timezone
    pub date: NaiveDate,
    pub report: AggregationReport,
    pub insights: Vec<String>,
    pub weekday_insights: Vec<String>,
    pub daily_state: DailyState,
    pub sleep_status: SleepStatus,
    /// Signal value the decay used for today
    pub today_signal: f64,
    pub current_energy: f64,
    pub energy_percent: f64,
}

/// Run every step against `input` with the built-in emotion vocabulary.
pub fn refresh(input: &RefreshInput, cfg: &JournalConfig) -> DashboardSnapshot {
    refresh_with_vocabulary(input, cfg, &EmotionClassification::default_vocabulary())
}

/// Run every step against `input` with a custom emotion vocabulary.
pub fn refresh_with_vocabulary(
    input: &RefreshInput,
    cfg: &JournalConfig,
    vocabulary: &EmotionClassification,
) -> DashboardSnapshot {
    let tz = cfg.profile.timezone();
    let now = input.now.with_timezone(&tz);
    let date = now.date_naive();

    // Step 1
    let report = aggregate(&input.logs, &input.signals, &tz);

    // Step 2
    let insights = generate_insights(&report.emotion_correlation, vocabulary, &cfg.insights);
    let weekday_insights = weekday_insights(&report.by_weekday);

    // Step 3
    let daily_state = input.daily_state.unwrap_or_default();
    let sleep_status = SleepStatus::assess(&daily_state, &cfg.insights);

    // Step 4
    let today_signal = value_on(&input.signals, date).unwrap_or(cfg.decay.default_signal);
    let decay_input = DecayInput::from_daily(&daily_state, &cfg.decay).with_signal(today_signal);
    let current_energy = decay(&decay_input, &now, cfg.decay.wake_time, &cfg.decay);
    let percent = energy_percent(current_energy, cfg.sleep.base_start_energy);

    debug!(
        %date,
        today_signal,
        deficit = daily_state.deficit,
        fatigue_load = daily_state.fatigue_load,
        "Evaluated current energy"
    );
    info!(
        profile = %cfg.profile.name,
        entries = input.logs.len(),
        insights = insights.len(),
        current_energy,
        "Dashboard refreshed"
    );

    DashboardSnapshot {
        date,
        report,
        insights,
        weekday_insights,
        daily_state,
        sleep_status,
        today_signal,
        current_energy,
        energy_percent: percent,
    }
}
