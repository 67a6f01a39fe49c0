//! Schedule result types and their table and calendar projections.

use chrono::{Duration, NaiveDate};
use std::fmt;
use thiserror::Error;

use crate::graph::{event_label, EventId};

/// Relative slack tolerance, scaled by the project duration.
pub const SLACK_EPSILON: f64 = 1e-9;

/// Absolute tolerance below which slack or float counts as zero.
///
/// `LS = LF - d` does not exactly undo `EF = ES + d`, and the rounding error
/// grows with the magnitude of the times, so the tolerance grows with it.
pub fn slack_tolerance(project_duration: f64) -> f64 {
    SLACK_EPSILON * project_duration.abs().max(1.0)
}

/// Column headers of the schedule table.
pub const TABLE_COLUMNS: [&str; 9] = [
    "Activity",
    "From-Event",
    "To-Event",
    "Duration",
    "ES",
    "EF",
    "LS",
    "LF",
    "Slack",
];

/// Earliest and latest time of one event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventTiming {
    pub event: EventId,
    pub earliest_time: f64,
    pub latest_time: f64,
}

impl EventTiming {
    pub fn label(&self) -> String {
        event_label(self.event)
    }

    pub fn float(&self) -> f64 {
        self.latest_time - self.earliest_time
    }
}

/// Schedule of one real activity.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityTiming {
    pub activity_id: String,
    pub from_event: EventId,
    pub to_event: EventId,
    pub duration: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    /// latest_start - earliest_start, never negative.
    pub slack: f64,
    /// Slack within `slack_tolerance` of zero.
    pub critical: bool,
}

impl ActivityTiming {
    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

/// One row of the schedule table, event ids rendered as labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleRow {
    pub activity: String,
    pub from_event: String,
    pub to_event: String,
    pub duration: f64,
    pub es: f64,
    pub ef: f64,
    pub ls: f64,
    pub lf: f64,
    pub slack: f64,
}

impl ScheduleRow {
    /// Cells in `TABLE_COLUMNS` order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.activity.clone(),
            self.from_event.clone(),
            self.to_event.clone(),
            self.duration.to_string(),
            self.es.to_string(),
            self.ef.to_string(),
            self.ls.to_string(),
            self.lf.to_string(),
            self.slack.to_string(),
        ]
    }
}

/// Activity times mapped onto calendar dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarRow {
    pub activity: String,
    pub early_start: NaiveDate,
    pub early_finish: NaiveDate,
    pub late_start: NaiveDate,
    pub late_finish: NaiveDate,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    /// A time offset lands outside the representable date range.
    #[error("{subject} at offset {offset} from {start} is outside the supported date range")]
    OutOfRange {
        subject: String,
        offset: f64,
        start: NaiveDate,
    },
}

/// Output of a schedule computation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleResult {
    /// Real activities in edge insertion order (declaration order when built from records).
    pub activities: Vec<ActivityTiming>,
    /// Indexed by event id.
    pub events: Vec<EventTiming>,
    /// Events in topological order.
    pub event_order: Vec<EventId>,
    pub project_duration: f64,
    /// Zero-slack activities, ordered by the topological position of their start event.
    pub critical_path: Vec<String>,
}

fn add_days(start: NaiveDate, offset: f64, subject: &str) -> Result<NaiveDate, CalendarError> {
    // Fractional days round up to whole days
    let days = offset.ceil();
    let shifted = if days.is_finite() && days.abs() < i64::MAX as f64 {
        Duration::try_days(days as i64).and_then(|delta| start.checked_add_signed(delta))
    } else {
        None
    };
    shifted.ok_or_else(|| CalendarError::OutOfRange {
        subject: subject.to_string(),
        offset,
        start,
    })
}

impl ScheduleResult {
    pub fn timing(&self, activity_id: &str) -> Option<&ActivityTiming> {
        self.activities.iter().find(|t| t.activity_id == activity_id)
    }

    pub fn event_timing(&self, event: EventId) -> Option<&EventTiming> {
        self.events.get(event as usize)
    }

    pub fn table(&self) -> Vec<ScheduleRow> {
        self.activities
            .iter()
            .map(|t| ScheduleRow {
                activity: t.activity_id.clone(),
                from_event: event_label(t.from_event),
                to_event: event_label(t.to_event),
                duration: t.duration,
                es: t.earliest_start,
                ef: t.earliest_finish,
                ls: t.latest_start,
                lf: t.latest_finish,
                slack: t.slack,
            })
            .collect()
    }

    /// Project activity times onto dates, counting time units as days from `start`.
    ///
    /// # Errors
    /// * `OutOfRange` if any date falls outside what `NaiveDate` can represent
    pub fn calendar(&self, start: NaiveDate) -> Result<Vec<CalendarRow>, CalendarError> {
        self.activities
            .iter()
            .map(|t| {
                let id = t.activity_id.as_str();
                Ok(CalendarRow {
                    activity: t.activity_id.clone(),
                    early_start: add_days(start, t.earliest_start, id)?,
                    early_finish: add_days(start, t.earliest_finish, id)?,
                    late_start: add_days(start, t.latest_start, id)?,
                    late_finish: add_days(start, t.latest_finish, id)?,
                })
            })
            .collect()
    }

    pub fn finish_date(&self, start: NaiveDate) -> Result<NaiveDate, CalendarError> {
        add_days(start, self.project_duration, "project finish")
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 9]> = self.table().iter().map(ScheduleRow::cells).collect();

        let mut widths: [usize; 9] = TABLE_COLUMNS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = TABLE_COLUMNS
            .iter()
            .zip(widths.iter())
            .map(|(name, &w)| format!("{:<w$}", name, w = w))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, &w))| {
                    if i < 3 {
                        format!("{:<w$}", cell, w = w)
                    } else {
                        format!("{:>w$}", cell, w = w)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }

        writeln!(f, "Project duration: {}", self.project_duration)?;
        write!(f, "Critical path: {}", self.critical_path.join(" → "))
    }
}
