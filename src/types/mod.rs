//! Shared data structures for the energy journal metrics
//!
//! - LogEntry: one journaled moment (input feed)
//! - DailyState: per-day sleep debt / fatigue record (input and output)
//! - SignalSample: simulated daily physiological reading
//! - AggregationReport and friends: derived averages and correlations

mod journal;
mod daily;
mod signal;
mod report;

pub use journal::*;
pub use daily::*;
pub use signal::*;
pub use report::*;
