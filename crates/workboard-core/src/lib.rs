//! # Workboard Core Library
//!
//! Scoring logic behind the office work-management dashboard: how loaded each
//! member of staff is, who is performing well over a reporting period, and
//! the summary numbers around both. Tasks and users are read-only snapshots
//! owned by the data layer; everything here is a pure projection of them,
//! recomputed whole on every call.
//!
//! ## Key Components
//!
//! - [`WorkloadAnalyzer`]: current-view workload points and load labels
//! - [`Leaderboard`]: high performer score and ranking for week/month/all
//! - [`date_range`] / [`filter_tasks_by_date`]: reporting-period selection
//! - [`WorkloadDistribution`] / [`TaskSummary`]: summary widgets
//! - [`DailyQuote`]: motivation quote with an explicit refresh policy
//! - [`Config`]: TOML configuration

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod motivation;
pub mod period;
pub mod snapshot;
pub mod summary;
pub mod task;
pub mod user;
pub mod workload;

pub use config::Config;
pub use error::{ConfigError, CoreError, QuoteError, Result, ValidationError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use motivation::{DailyQuote, HttpQuoteProvider, Quote, QuotePolicy, QuoteProvider, StaticQuoteProvider};
pub use period::{date_range, filter_tasks_by_date, parse_date, parse_datetime, DateFilter, DateRange, LeaderboardPeriod};
pub use snapshot::Snapshot;
pub use summary::{summarize_tasks, DashboardSummary, TaskSummary, WorkloadDistribution};
pub use task::{tasks_for_user, Priority, Task, TaskStatus};
pub use user::{Role, User};
pub use workload::{
    analyze_user, high_performer_score, workload_visuals, AnalyzedUser, PriorityCounts,
    ScoringOptions, WorkloadAnalyzer, WorkloadCategory, WorkloadLevel, WorkloadVisuals,
};
