//! Date-range computation and task filtering.
//!
//! Every range is expressed in local wall-clock time as a closed interval
//! `[start, end]` with millisecond precision, so "end of day" is
//! `23:59:59.999`. The reference instant is always passed in by the caller.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::Task;

/// A closed local-time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Range covering the calendar days `first..=last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Dashboard filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Build a filter from a mode name plus optional custom bounds.
    ///
    /// Bounds are ignored for every mode except `custom`.
    pub fn from_mode(
        mode: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        match mode.parse::<DateFilter>()? {
            DateFilter::Custom { .. } => Ok(DateFilter::Custom { start, end }),
            other => Ok(other),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            DateFilter::All => "all",
            DateFilter::Today => "today",
            DateFilter::Week => "week",
            DateFilter::Month => "month",
            DateFilter::Custom { .. } => "custom",
        }
    }
}

impl FromStr for DateFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(DateFilter::All),
            "today" => Ok(DateFilter::Today),
            "week" => Ok(DateFilter::Week),
            "month" => Ok(DateFilter::Month),
            "custom" => Ok(DateFilter::Custom {
                start: None,
                end: None,
            }),
            other => Err(ValidationError::InvalidValue {
                field: "filter".to_string(),
                message: format!("unknown filter mode '{other}' (expected all, today, week, month or custom)"),
            }),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())
    }
}

/// Reporting period used by the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardPeriod {
    #[default]
    Week,
    Month,
    All,
}

impl LeaderboardPeriod {
    pub fn as_filter(self) -> DateFilter {
        match self {
            LeaderboardPeriod::Week => DateFilter::Week,
            LeaderboardPeriod::Month => DateFilter::Month,
            LeaderboardPeriod::All => DateFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardPeriod::Week => "week",
            LeaderboardPeriod::Month => "month",
            LeaderboardPeriod::All => "all",
        }
    }
}

impl FromStr for LeaderboardPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(LeaderboardPeriod::Week),
            "month" => Ok(LeaderboardPeriod::Month),
            "all" => Ok(LeaderboardPeriod::All),
            other => Err(ValidationError::InvalidValue {
                field: "period".to_string(),
                message: format!("unknown period '{other}' (expected week, month or all)"),
            }),
        }
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    // The 1st plus 32 days always lands inside the following month.
    let probe = month_start(date) + Duration::days(32);
    month_start(probe) - Duration::days(1)
}

/// Resolve a filter into a concrete range relative to `now`.
///
/// Returns `None` for "no filtering": the `all` mode, and `custom` with a
/// missing bound.
pub fn date_range(filter: DateFilter, now: NaiveDateTime) -> Option<DateRange> {
    let today = now.date();
    match filter {
        DateFilter::All => None,
        DateFilter::Today => Some(DateRange::days(today, today)),
        DateFilter::Week => {
            let sunday = week_start(today);
            Some(DateRange::days(sunday, sunday + Duration::days(6)))
        }
        DateFilter::Month => Some(DateRange::days(month_start(today), month_end(today))),
        DateFilter::Custom {
            start: Some(start),
            end: Some(end),
        } => Some(DateRange::days(start, end)),
        DateFilter::Custom { .. } => None,
    }
}

/// Keep the tasks whose comparison date falls inside `range`.
///
/// Done tasks are placed by their deadline, every other status by its start
/// date. Without a range the input is returned unchanged.
pub fn filter_tasks_by_date<'a, I>(tasks: I, range: Option<&DateRange>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    match range {
        None => tasks.into_iter().collect(),
        Some(range) => tasks
            .into_iter()
            .filter(|task| task.comparison_date().is_some_and(|at| range.contains(at)))
            .collect(),
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp as exported by the data layer into local wall-clock time.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Local).naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }
    Err(ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse a calendar date, accepting any timestamp form [`parse_datetime`] does.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    parse_datetime(value).map(|at| at.date())
}
