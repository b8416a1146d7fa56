//! Aggregates behind the dashboard summary widgets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Task, TaskStatus};
use crate::workload::{AnalyzedUser, WorkloadCategory};

/// How many users sit in each workload category, plus the mean completion rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDistribution {
    pub relaxed: usize,
    pub balanced: usize,
    pub busy: usize,
    pub overload: usize,
    pub avg_completion_rate: f64,
}

impl WorkloadDistribution {
    pub fn from_analyzed(analyzed: &[AnalyzedUser]) -> Self {
        let mut distribution = Self::default();
        for user in analyzed {
            match user.visuals.category {
                WorkloadCategory::Relaxed => distribution.relaxed += 1,
                WorkloadCategory::Balanced => distribution.balanced += 1,
                WorkloadCategory::Busy => distribution.busy += 1,
                WorkloadCategory::Overload => distribution.overload += 1,
            }
        }
        if !analyzed.is_empty() {
            let total: f64 = analyzed.iter().map(|user| user.completion_rate).sum();
            distribution.avg_completion_rate = total / analyzed.len() as f64;
        }
        distribution
    }

    pub fn count(&self, category: WorkloadCategory) -> usize {
        match category {
            WorkloadCategory::Relaxed => self.relaxed,
            WorkloadCategory::Balanced => self.balanced,
            WorkloadCategory::Busy => self.busy,
            WorkloadCategory::Overload => self.overload,
        }
    }
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub to_do: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub review: usize,
    pub done: usize,
    /// Not done and the deadline date is before `today`.
    pub overdue: usize,
}

pub fn summarize_tasks<'a, I>(tasks: I, today: NaiveDate) -> TaskSummary
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut summary = TaskSummary::default();
    for task in tasks {
        summary.total += 1;
        match task.status {
            TaskStatus::ToDo => summary.to_do += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Pending => summary.pending += 1,
            TaskStatus::Review => summary.review += 1,
            TaskStatus::Done => summary.done += 1,
        }
        if !task.is_done() && task.deadline.is_some_and(|deadline| deadline.date() < today) {
            summary.overdue += 1;
        }
    }
    summary
}

/// Everything the dashboard summary row shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub distribution: WorkloadDistribution,
    pub tasks: TaskSummary,
    pub high_performers: usize,
}

impl DashboardSummary {
    pub fn build<'a, I>(analyzed: &[AnalyzedUser], tasks_in_view: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        Self {
            distribution: WorkloadDistribution::from_analyzed(analyzed),
            tasks: summarize_tasks(tasks_in_view, today),
            high_performers: analyzed.iter().filter(|user| user.is_high_performer).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::parse_datetime;
    use crate::task::Priority;
    use crate::user::{Role, User};
    use crate::workload::{analyze_user, ScoringOptions};

    fn analyzed_with(priorities: &[Priority], done: usize) -> AnalyzedUser {
        let mut tasks: Vec<Task> = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| Task::new(&i.to_string(), "x", *p, TaskStatus::InProgress))
            .collect();
        tasks.extend((0..done).map(|i| Task::new(&format!("d{i}"), "x", Priority::Low, TaskStatus::Done)));
        let refs: Vec<&Task> = tasks.iter().collect();
        analyze_user(
            &User::new("u", "U", Role::Staff),
            &refs,
            &refs,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &ScoringOptions::default(),
        )
    }

    #[test]
    fn distribution_buckets_and_average() {
        let users = vec![
            analyzed_with(&[], 0),                              // idle, 0%
            analyzed_with(&[Priority::Low], 1),                 // relaxed, 50%
            analyzed_with(&[Priority::Urgent, Priority::High], 0), // 7 balanced, 0%
            analyzed_with(&[Priority::Urgent; 4], 0),           // 16 busy
            analyzed_with(&[Priority::Urgent; 7], 0),           // 28 overload
        ];
        let distribution = WorkloadDistribution::from_analyzed(&users);
        assert_eq!(distribution.relaxed, 2);
        assert_eq!(distribution.balanced, 1);
        assert_eq!(distribution.busy, 1);
        assert_eq!(distribution.overload, 1);
        assert_eq!(distribution.count(WorkloadCategory::Relaxed), 2);
        assert!((distribution.avg_completion_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_distribution_is_zero() {
        let distribution = WorkloadDistribution::from_analyzed(&[]);
        assert_eq!(distribution, WorkloadDistribution::default());
        assert_eq!(distribution.avg_completion_rate, 0.0);
    }

    #[test]
    fn task_summary_counts_statuses_and_overdue() {
        let at = |s: &str| parse_datetime(s).unwrap();
        let tasks = vec![
            Task::new("1", "a", Priority::Low, TaskStatus::ToDo).with_dates(None, Some(at("2024-03-14"))),
            Task::new("2", "b", Priority::Low, TaskStatus::InProgress).with_dates(None, Some(at("2024-03-15"))),
            Task::new("3", "c", Priority::Low, TaskStatus::Done).with_dates(None, Some(at("2024-03-01"))),
            Task::new("4", "d", Priority::Low, TaskStatus::Pending),
            Task::new("5", "e", Priority::Low, TaskStatus::Review).with_dates(None, Some(at("2024-02-01"))),
        ];
        let summary = summarize_tasks(&tasks, at("2024-03-15").date());
        assert_eq!(
            summary,
            TaskSummary {
                total: 5,
                to_do: 1,
                in_progress: 1,
                pending: 1,
                review: 1,
                done: 1,
                overdue: 2,
            }
        );
    }
}
