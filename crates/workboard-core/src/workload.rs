//! Workload analysis.
//!
//! Converts each user's tasks into weighted workload points, a qualitative
//! load label, completion statistics and the composite high performer score.
//! [`analyze_user`] is the single scoring routine shared by the current-view
//! workload widget and the fixed-period leaderboard.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::period::{date_range, filter_tasks_by_date, DateFilter};
use crate::task::{tasks_for_user, Priority, Task};
use crate::user::User;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Tunable knobs for scoring. Defaults reproduce the dashboard behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringOptions {
    /// Days ahead of today (inclusive) that count as an upcoming deadline.
    pub upcoming_deadline_days: u32,
    /// Minimum high performer score to be flagged as a high performer.
    pub high_performer_threshold: u8,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            upcoming_deadline_days: 3,
            high_performer_threshold: 60,
        }
    }
}

/// Per-priority task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub urgent: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl PriorityCounts {
    pub fn add(&mut self, priority: Priority) {
        match priority {
            Priority::Urgent => self.urgent += 1,
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    /// Weighted sum of the counts (4/3/2/1).
    pub fn points(&self) -> u32 {
        self.urgent * Priority::Urgent.weight()
            + self.high * Priority::High.weight()
            + self.medium * Priority::Medium.weight()
            + self.low * Priority::Low.weight()
    }
}

/// Qualitative load derived from the active-task score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkloadLevel {
    Idle,
    Relaxed,
    Balanced,
    Busy,
    Overload,
}

impl WorkloadLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => WorkloadLevel::Idle,
            1..=5 => WorkloadLevel::Relaxed,
            6..=14 => WorkloadLevel::Balanced,
            15..=24 => WorkloadLevel::Busy,
            _ => WorkloadLevel::Overload,
        }
    }

    pub fn category(self) -> WorkloadCategory {
        match self {
            WorkloadLevel::Idle | WorkloadLevel::Relaxed => WorkloadCategory::Relaxed,
            WorkloadLevel::Balanced => WorkloadCategory::Balanced,
            WorkloadLevel::Busy => WorkloadCategory::Busy,
            WorkloadLevel::Overload => WorkloadCategory::Overload,
        }
    }

    pub fn visuals(self) -> WorkloadVisuals {
        let (label, color, icon) = match self {
            WorkloadLevel::Idle => ("Idle", "#9ca3af", "coffee"),
            WorkloadLevel::Relaxed => ("Relaxed", "#22c55e", "smile"),
            WorkloadLevel::Balanced => ("Balanced", "#3b82f6", "check-circle"),
            WorkloadLevel::Busy => ("Busy", "#f97316", "flame"),
            WorkloadLevel::Overload => ("Overload", "#ef4444", "alert-triangle"),
        };
        WorkloadVisuals {
            level: self,
            label,
            color,
            icon,
            category: self.category(),
        }
    }
}

/// Summary-widget bucket. Idle users count as relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadCategory {
    Relaxed,
    Balanced,
    Busy,
    Overload,
}

/// Presentation descriptor for a workload score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkloadVisuals {
    pub level: WorkloadLevel,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub category: WorkloadCategory,
}

/// Map an active-task score to its visuals.
pub fn workload_visuals(score: u32) -> WorkloadVisuals {
    WorkloadLevel::from_score(score).visuals()
}

/// Derived per-user aggregate. Rebuilt from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedUser {
    #[serde(flatten)]
    pub user: User,
    /// Workload points of the active tasks in range.
    pub score: u32,
    pub active_count: usize,
    pub completed_count: usize,
    pub priority_counts: PriorityCounts,
    pub upcoming_deadlines: usize,
    /// Percentage of in-range tasks that are done, 0 to 100.
    pub completion_rate: f64,
    /// Workload points of the completed tasks in range.
    pub performance_score: u32,
    /// Mean planned duration in days of completed tasks.
    pub avg_completion_time: f64,
    pub high_performer_score: u8,
    pub is_high_performer: bool,
    pub visuals: WorkloadVisuals,
}

/// Score one user.
///
/// `tasks_in_range` is the user's task list after date filtering and feeds
/// every statistic except the upcoming-deadline count, which always looks at
/// `all_user_tasks` so deadline pressure ignores the reporting period.
pub fn analyze_user(
    user: &User,
    tasks_in_range: &[&Task],
    all_user_tasks: &[&Task],
    today: NaiveDate,
    options: &ScoringOptions,
) -> AnalyzedUser {
    let mut priority_counts = PriorityCounts::default();
    let mut completed_points = PriorityCounts::default();
    let mut completion_days = 0.0;
    let mut active_count = 0;
    let mut completed_count = 0;

    for task in tasks_in_range {
        if task.is_done() {
            completed_count += 1;
            completed_points.add(task.priority);
            completion_days += planned_days(task.start_date, task.deadline);
        } else {
            active_count += 1;
            priority_counts.add(task.priority);
        }
    }

    // A window reaching past the last representable date has no upper end.
    let horizon =
        today.checked_add_signed(Duration::days(i64::from(options.upcoming_deadline_days)));
    let upcoming_deadlines = all_user_tasks
        .iter()
        .filter(|task| !task.is_done())
        .filter_map(|task| task.deadline.map(|deadline| deadline.date()))
        .filter(|due| *due >= today && horizon.map_or(true, |end| *due <= end))
        .count();

    let completion_rate = if tasks_in_range.is_empty() {
        0.0
    } else {
        completed_count as f64 / tasks_in_range.len() as f64 * 100.0
    };

    let avg_completion_time = if completed_count == 0 {
        0.0
    } else {
        completion_days / completed_count as f64
    };

    let score = priority_counts.points();
    let performance_score = completed_points.points();
    let high_performer_score = high_performer_score(
        completion_rate,
        performance_score,
        completed_count,
        active_count,
        upcoming_deadlines,
    );

    AnalyzedUser {
        user: user.clone(),
        score,
        active_count,
        completed_count,
        priority_counts,
        upcoming_deadlines,
        completion_rate,
        performance_score,
        avg_completion_time,
        high_performer_score,
        is_high_performer: high_performer_score >= options.high_performer_threshold,
        visuals: workload_visuals(score),
    }
}

/// Composite 0-100 score: completion rate (max 40), completed points
/// (max 30) and four activity bonuses.
pub fn high_performer_score(
    completion_rate: f64,
    performance_score: u32,
    completed_count: usize,
    active_count: usize,
    upcoming_deadlines: usize,
) -> u8 {
    let mut score = (completion_rate * 0.4).min(40.0);
    score += (f64::from(performance_score) * 3.0).min(30.0);
    if completed_count > 0 {
        score += 10.0;
    }
    if active_count > 0 {
        score += 10.0;
    }
    if completed_count >= 3 {
        score += 5.0;
    }
    if upcoming_deadlines == 0 {
        score += 5.0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// Whole days between start and deadline, rounded up, at least one.
fn planned_days(start: Option<NaiveDateTime>, deadline: Option<NaiveDateTime>) -> f64 {
    match (start, deadline) {
        (Some(start), Some(deadline)) => {
            let millis = (deadline - start).num_milliseconds() as f64;
            (millis / MILLIS_PER_DAY).ceil().max(1.0)
        }
        _ => 1.0,
    }
}

/// Current-view workload analysis for the dashboard.
#[derive(Debug, Clone, Default)]
pub struct WorkloadAnalyzer {
    pub options: ScoringOptions,
}

impl WorkloadAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScoringOptions) -> Self {
        Self { options }
    }

    /// Analyse every user against the tasks selected by `filter`.
    ///
    /// Returns one entry per user in input order.
    pub fn analyze(
        &self,
        users: &[User],
        tasks: &[Task],
        filter: DateFilter,
        now: NaiveDateTime,
    ) -> Vec<AnalyzedUser> {
        let range = date_range(filter, now);
        debug!(filter = %filter, ?range, users = users.len(), tasks = tasks.len(), "analyzing workload");

        users
            .iter()
            .map(|user| {
                let user_tasks = tasks_for_user(tasks, &user.name);
                let in_range = filter_tasks_by_date(user_tasks.iter().copied(), range.as_ref());
                analyze_user(user, &in_range, &user_tasks, now.date(), &self.options)
            })
            .collect()
    }

    /// Render workload rows as an ASCII table.
    pub fn render_report(&self, analyzed: &[AnalyzedUser]) -> String {
        let mut output = String::new();
        output.push_str("\nWorkload\n");
        output.push_str(&"=".repeat(80));
        output.push_str("\n\n");

        if analyzed.is_empty() {
            output.push_str("No users.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>6} {:<10} {:>7} {:>5} {:>9} {:>10}\n",
            "Name", "Points", "Load", "Active", "Done", "Due soon", "Completion"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in analyzed {
            output.push_str(&format!(
                "{:<22} {:>6} {:<10} {:>7} {:>5} {:>9} {:>9.0}%\n",
                truncate(&row.user.name, 22),
                row.score,
                row.visuals.label,
                row.active_count,
                row.completed_count,
                row.upcoming_deadlines,
                row.completion_rate
            ));
        }

        output
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
