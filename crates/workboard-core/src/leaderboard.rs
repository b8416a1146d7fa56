//! High performer leaderboard over a fixed reporting period.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::period::{date_range, filter_tasks_by_date, LeaderboardPeriod};
use crate::task::{tasks_for_user, Task};
use crate::user::User;
use crate::workload::{analyze_user, truncate, AnalyzedUser, ScoringOptions};

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    #[serde(flatten)]
    pub analysis: AnalyzedUser,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    pub options: ScoringOptions,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScoringOptions) -> Self {
        Self { options }
    }

    /// Score every user over `period` without reordering.
    pub fn analyze(
        &self,
        users: &[User],
        tasks: &[Task],
        period: LeaderboardPeriod,
        now: NaiveDateTime,
    ) -> Vec<AnalyzedUser> {
        let range = date_range(period.as_filter(), now);
        users
            .iter()
            .map(|user| {
                let user_tasks = tasks_for_user(tasks, &user.name);
                let in_period = filter_tasks_by_date(user_tasks.iter().copied(), range.as_ref());
                analyze_user(user, &in_period, &user_tasks, now.date(), &self.options)
            })
            .collect()
    }

    /// Score and rank users by high performer score, best first.
    ///
    /// Ties keep their input order.
    pub fn rank(
        &self,
        users: &[User],
        tasks: &[Task],
        period: LeaderboardPeriod,
        now: NaiveDateTime,
    ) -> Vec<LeaderboardEntry> {
        let mut analyzed = self.analyze(users, tasks, period, now);
        analyzed.sort_by(|a, b| b.high_performer_score.cmp(&a.high_performer_score));

        let entries: Vec<LeaderboardEntry> = analyzed
            .into_iter()
            .enumerate()
            .map(|(index, analysis)| LeaderboardEntry {
                rank: index + 1,
                analysis,
            })
            .collect();

        debug!(
            period = %period,
            users = entries.len(),
            high_performers = entries.iter().filter(|e| e.analysis.is_high_performer).count(),
            "ranked leaderboard"
        );
        entries
    }

    /// Render ranked rows as an ASCII table.
    pub fn render_report(&self, period: LeaderboardPeriod, entries: &[LeaderboardEntry]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\nLeaderboard ({period})\n"));
        output.push_str(&"=".repeat(72));
        output.push_str("\n\n");

        if entries.is_empty() {
            output.push_str("No users.\n");
            return output;
        }

        output.push_str(&format!(
            "{:>4}  {:<22} {:>6} {:>10} {:>6}  {}\n",
            "#", "Name", "Score", "Completion", "Points", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for entry in entries {
            let row = &entry.analysis;
            output.push_str(&format!(
                "{:>4}  {:<22} {:>6} {:>9.0}% {:>6}  {}\n",
                entry.rank,
                truncate(&row.user.name, 22),
                row.high_performer_score,
                row.completion_rate,
                row.performance_score,
                if row.is_high_performer { "*" } else { "" }
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::parse_datetime;
    use crate::task::{Priority, TaskStatus};
    use crate::user::Role;

    fn at(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let users = vec![
            User::new("1", "Andi", Role::Staff),
            User::new("2", "Budi", Role::Staff),
            User::new("3", "Citra", Role::Staff),
        ];
        let tasks = vec![
            Task::new("t1", "a", Priority::High, TaskStatus::Done).with_assignees(["Budi"]),
            Task::new("t2", "b", Priority::High, TaskStatus::ToDo).with_assignees(["Budi"]),
        ];
        let ranked = Leaderboard::new().rank(&users, &tasks, LeaderboardPeriod::All, at("2024-03-15"));

        let names: Vec<_> = ranked.iter().map(|e| e.analysis.user.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Andi", "Citra"]);
        let ranks: Vec<_> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        // 50% * 0.4 + 3 * 3 + 10 + 10 + 5
        assert_eq!(ranked[0].analysis.high_performer_score, 54);
        assert_eq!(ranked[1].analysis.high_performer_score, 5);
    }

    #[test]
    fn week_period_excludes_last_weeks_work() {
        let users = vec![User::new("1", "Budi", Role::Staff)];
        let tasks = vec![
            // Done last week: keyed by deadline, outside this week.
            Task::new("t1", "a", Priority::Urgent, TaskStatus::Done)
                .with_assignees(["Budi"])
                .with_dates(Some(at("2024-03-01")), Some(at("2024-03-08"))),
            // Started this week.
            Task::new("t2", "b", Priority::Medium, TaskStatus::InProgress)
                .with_assignees(["Budi"])
                .with_dates(Some(at("2024-03-11")), Some(at("2024-03-30"))),
        ];
        let now = at("2024-03-15T10:00");
        let board = Leaderboard::new();

        let week = board.analyze(&users, &tasks, LeaderboardPeriod::Week, now);
        assert_eq!(week[0].completed_count, 0);
        assert_eq!(week[0].active_count, 1);

        let month = board.analyze(&users, &tasks, LeaderboardPeriod::Month, now);
        assert_eq!(month[0].completed_count, 1);
        assert_eq!(month[0].performance_score, 4);
    }

    #[test]
    fn report_marks_high_performers() {
        let users = vec![User::new("1", "Budi", Role::Staff)];
        let tasks: Vec<Task> = (0..3)
            .map(|i| {
                Task::new(&format!("t{i}"), "x", Priority::Urgent, TaskStatus::Done)
                    .with_assignees(["Budi"])
            })
            .chain(std::iter::once(
                Task::new("t9", "y", Priority::Low, TaskStatus::ToDo).with_assignees(["Budi"]),
            ))
            .collect();
        let board = Leaderboard::new();
        let ranked = board.rank(&users, &tasks, LeaderboardPeriod::All, at("2024-03-15"));
        assert!(ranked[0].analysis.is_high_performer);
        let report = board.render_report(LeaderboardPeriod::All, &ranked);
        assert!(report.contains("Leaderboard (all)"));
        assert!(report.contains("Budi"));
        assert!(report.contains('*'));
    }
}
