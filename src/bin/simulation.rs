//! Journal Simulation
//!
//! Generates a seeded signal series and a synthetic journal, runs one
//! dashboard refresh over it and prints the snapshot as JSON. Useful for
//! eyeballing the metrics end to end and for tuning a `journal_config.toml`.
//!
//! # Usage
//! ```bash
//! ./simulation --days 60 --seed 7 --trend declining --sleep 6.5 --pretty
//! RUST_LOG=debug ./simulation --days 14 --seed 1 > snapshot.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use clap::Parser;
use rand::prelude::*;
use std::io::{self, Write};
use tracing::info;

use energy_insights::config::{self, JournalConfig, SleepConfig};
use energy_insights::emotions::{BOOSTING_EMOTIONS, DRAINING_EMOTIONS};
use energy_insights::pipeline::{refresh, RefreshInput};
use energy_insights::simulation::simulate;
use energy_insights::sleep::update_daily;
use energy_insights::types::{journal_limits, DailyState, LogEntry, SignalSample, Trend};

// ============================================================================
// Journal Constants
// ============================================================================

/// Signal value treated as neutral when deriving a synthetic energy delta
const NEUTRAL_SIGNAL: f64 = 60.0;
/// Signal points per unit of energy delta
const SIGNAL_PER_ENERGY: f64 = 10.0;
/// Random spread added to each synthetic energy delta
const ENERGY_NOISE: i32 = 3;
/// Night-to-night spread around the mean sleep duration (hours)
const SLEEP_SPREAD: f64 = 1.5;
/// First and last hour of the day an entry can be logged at
const ENTRY_HOURS: (u32, u32) = (8, 22);

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "journal-simulation")]
#[command(about = "Synthetic energy journal and signal series for energy-insights")]
#[command(version = "1.0")]
struct Args {
    /// Days of history to simulate (overrides signal.days)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=3650))]
    days: Option<u32>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Signal trend: stable, improving or declining (overrides signal.trend)
    #[arg(short, long)]
    trend: Option<Trend>,

    /// Daily signal perturbation bound (overrides signal.variability)
    #[arg(long)]
    variability: Option<f64>,

    /// Starting signal value (overrides signal.base_value)
    #[arg(long)]
    base: Option<f64>,

    /// Journal entries per simulated day
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..=12))]
    entries_per_day: u32,

    /// Mean hours slept per night
    #[arg(long, default_value = "7.0")]
    sleep: f64,

    /// Last simulated day (YYYY-MM-DD), defaults to today in the profile timezone
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Local hour on the last day to evaluate current energy at
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: u32,

    /// Pretty-print the snapshot
    #[arg(short, long)]
    pretty: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "ENERGY_INSIGHTS_JSON_LOGS")]
    json_logs: bool,
}

// ============================================================================
// Synthetic Journal
// ============================================================================

/// Entries and the final daily record for the simulated window.
struct Journal {
    logs: Vec<LogEntry>,
    daily_state: Option<DailyState>,
}

fn synthesize_journal<Tz: TimeZone>(
    signals: &[SignalSample],
    entries_per_day: u32,
    mean_sleep: f64,
    sleep_cfg: &SleepConfig,
    tz: &Tz,
    rng: &mut StdRng,
) -> Journal {
    let mut logs = Vec::new();
    let mut daily_state: Option<DailyState> = None;

    for sample in signals {
        let sleep_hours = (mean_sleep + rng.gen_range(-SLEEP_SPREAD..=SLEEP_SPREAD))
            .clamp(journal_limits::MIN_SLEEP_HOURS, journal_limits::MAX_SLEEP_HOURS);
        let sleep_hours = (sleep_hours * 10.0).round() / 10.0;
        daily_state = Some(update_daily(daily_state.as_ref(), sleep_hours, sleep_cfg));

        for _ in 0..entries_per_day {
            let Some(timestamp) = entry_time(sample.date, tz, rng) else {
                continue;
            };

            #[allow(clippy::cast_possible_truncation)]
            let lean = ((sample.value - NEUTRAL_SIGNAL) / SIGNAL_PER_ENERGY).round() as i32;
            let energy = (lean + rng.gen_range(-ENERGY_NOISE..=ENERGY_NOISE)).clamp(
                journal_limits::MIN_ENERGY_DELTA,
                journal_limits::MAX_ENERGY_DELTA,
            );

            let pool = if energy > 0 {
                BOOSTING_EMOTIONS
            } else {
                DRAINING_EMOTIONS
            };
            let count = rng.gen_range(journal_limits::MIN_EMOTIONS..=journal_limits::MAX_EMOTIONS);
            let emotions = pool.choose_multiple(rng, count).copied();

            let mut entry = LogEntry::new(energy, emotions, timestamp);
            entry.sleep_hours = sleep_hours;
            logs.push(entry);
        }
    }

    Journal { logs, daily_state }
}

/// A random local time during `date`'s waking hours, as UTC.
fn entry_time<Tz: TimeZone>(date: NaiveDate, tz: &Tz, rng: &mut StdRng) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(
        rng.gen_range(ENTRY_HOURS.0..=ENTRY_HOURS.1),
        rng.gen_range(0..60),
        0,
    )?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    let mut cfg = JournalConfig::load();
    if let Some(days) = args.days {
        cfg.signal.days = days;
    }
    if let Some(trend) = args.trend {
        cfg.signal.trend = trend;
    }
    if let Some(variability) = args.variability {
        cfg.signal.variability = variability;
    }
    if let Some(base) = args.base {
        cfg.signal.base_value = base;
    }
    cfg.validate().context("Invalid simulation parameters")?;
    config::init(cfg);
    let cfg = config::get();

    let tz = cfg.profile.timezone();
    let today = args
        .today
        .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        profile = %cfg.profile.name,
        days = cfg.signal.days,
        trend = %cfg.signal.trend,
        seed = ?args.seed,
        %today,
        "Starting journal simulation"
    );

    let signals = simulate(&cfg.signal, today, &mut rng);
    let journal = synthesize_journal(
        &signals,
        args.entries_per_day,
        args.sleep,
        &cfg.sleep,
        &tz,
        &mut rng,
    );

    let local_now = today
        .and_hms_opt(args.hour, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).single())
        .context("Evaluation time does not exist in the profile timezone")?;

    let input = RefreshInput {
        logs: journal.logs,
        daily_state: journal.daily_state,
        signals,
        now: local_now.with_timezone(&Utc),
    };
    let snapshot = refresh(&input, cfg);

    let first_day = today
        .checked_sub_days(Days::new(u64::from(cfg.signal.days.saturating_sub(1))))
        .unwrap_or(today);
    info!(
        entries = input.logs.len(),
        from = %first_day,
        to = %today,
        today_signal = snapshot.today_signal,
        current_energy = snapshot.current_energy,
        "Simulation complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;

    Ok(())
}
