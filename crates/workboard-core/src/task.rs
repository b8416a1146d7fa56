//! Task records as exported by the data layer.
//!
//! The scoring core only reads tasks. Loosely typed wire fields are
//! normalised here, at the deserialisation boundary, so the rest of the crate
//! works with plain Rust types:
//!
//! - `pic` (a name, a list of names, or garbage) becomes `assignees: Vec<String>`
//! - `startDate` / `deadline` become optional local [`NaiveDateTime`]s
//! - numeric ids become strings

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::period::parse_datetime;

/// Task priority. The discriminant order matches the workload weight order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "urgent", alias = "URGENT")]
    Urgent,
}

impl Priority {
    /// Workload points contributed by one task of this priority.
    pub fn weight(self) -> u32 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "To Do", alias = "ToDo", alias = "Todo", alias = "todo", alias = "to_do")]
    ToDo,
    #[serde(
        rename = "In Progress",
        alias = "InProgress",
        alias = "in_progress",
        alias = "in progress"
    )]
    InProgress,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "review")]
    Review,
    #[serde(alias = "done")]
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Person(s) in charge, by display name.
    #[serde(rename = "pic", default, deserialize_with = "deserialize_assignees")]
    pub assignees: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Task {
    pub fn new(id: &str, title: &str, priority: Priority, status: TaskStatus) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            priority,
            status,
            assignees: Vec::new(),
            start_date: None,
            deadline: None,
            project_id: None,
        }
    }

    pub fn with_assignees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = normalize_names(names.into_iter().map(Into::into));
        self
    }

    pub fn with_dates(
        mut self,
        start_date: Option<NaiveDateTime>,
        deadline: Option<NaiveDateTime>,
    ) -> Self {
        self.start_date = start_date;
        self.deadline = deadline;
        self
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// The instant that places this task in a reporting period: when the
    /// work concluded for done tasks, when it began for everything else.
    pub fn comparison_date(&self) -> Option<NaiveDateTime> {
        if self.is_done() {
            self.deadline
        } else {
            self.start_date
        }
    }

    pub fn is_assigned_to(&self, name: &str) -> bool {
        let name = name.trim();
        self.assignees.iter().any(|assignee| assignee == name)
    }
}

/// Tasks whose PIC list contains `name`, in input order.
pub fn tasks_for_user<'a>(tasks: &'a [Task], name: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.is_assigned_to(name)).collect()
}

fn normalize_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn deserialize_assignees<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let names = match raw {
        Value::String(name) => vec![name],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(normalize_names(names))
}

fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_datetime(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
