//! Critical Path Method scheduling on activity-on-arrow networks.
//!
//! Pipeline: raw rows are parsed into `ActivityRecord`s, checked, turned into
//! an event graph (with dummy edges where predecessors converge), and the
//! engine derives ES/EF/LS/LF/slack, the project duration and the critical path.
//!
//! Every computation builds its own graph; nothing is shared between calls.

pub mod config;
pub mod engine;
pub mod graph;
pub mod interner;
pub mod logging;
pub mod models;
pub mod parser;
#[cfg(feature = "python")]
mod python;
pub mod validation;

use thiserror::Error;

pub use config::{ParserConfig, ScheduleConfig, UnknownPredecessorPolicy};
pub use engine::{
    compute_times, slack_tolerance, ActivityTiming, CalendarError, CalendarRow, EventTiming,
    PropagationError, ScheduleResult, ScheduleRow, TABLE_COLUMNS,
};
pub use graph::{build_aoa_graph, ActivityEdge, AoaBuilder, EdgeKind, EventGraph, EventId};
pub use models::{ActivityRecord, RawRow};
pub use parser::{parse_rows, ParseError};
pub use validation::{validate_records, ValidationError};

/// Errors from any stage of a schedule computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CpmError {
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Duplicate activity id: {0}")]
    DuplicateActivity(String),
    #[error("Activity '{activity}' has invalid duration {duration}")]
    InvalidDuration { activity: String, duration: f64 },
    #[error("Activity '{activity}' references unknown predecessor '{predecessor}'")]
    UnknownPredecessor {
        activity: String,
        predecessor: String,
    },
    #[error("Activity '{activity}' references '{predecessor}' before it is declared")]
    ForwardReference {
        activity: String,
        predecessor: String,
    },
    #[error("Circular dependency detected: {}", .0.join(", "))]
    CycleDetected(Vec<String>),
    #[error("Inconsistent schedule: {subject} has negative slack {slack}")]
    InconsistentSchedule { subject: String, slack: f64 },
}

impl From<ParseError> for CpmError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedRow { row, reason } => CpmError::MalformedRow { row, reason },
        }
    }
}

impl From<ValidationError> for CpmError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::DuplicateActivity(id) => CpmError::DuplicateActivity(id),
            ValidationError::InvalidDuration { activity, duration } => {
                CpmError::InvalidDuration { activity, duration }
            }
            ValidationError::UnknownPredecessor {
                activity,
                predecessor,
            } => CpmError::UnknownPredecessor {
                activity,
                predecessor,
            },
            ValidationError::ForwardReference {
                activity,
                predecessor,
            } => CpmError::ForwardReference {
                activity,
                predecessor,
            },
            ValidationError::CycleDetected(ids) => CpmError::CycleDetected(ids),
        }
    }
}

impl From<PropagationError> for CpmError {
    fn from(err: PropagationError) -> Self {
        match err {
            PropagationError::CycleDetected(events) => CpmError::CycleDetected(events),
            PropagationError::InconsistentSchedule { subject, slack } => {
                CpmError::InconsistentSchedule { subject, slack }
            }
        }
    }
}

/// Event graph and the schedule computed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct CpmSchedule {
    pub graph: EventGraph,
    pub result: ScheduleResult,
}

/// Validate `records`, build the event graph and compute the schedule.
///
/// # Errors
/// * `DuplicateActivity`, `InvalidDuration` for bad records
/// * `UnknownPredecessor` under the `Reject` policy
/// * `CycleDetected` for circular precedence
/// * `ForwardReference` when a predecessor is declared after its successor
/// * `InconsistentSchedule` if negative slack shows up
pub fn compute_schedule(
    records: &[ActivityRecord],
    config: &ScheduleConfig,
) -> Result<CpmSchedule, CpmError> {
    let records = validate_records(records, config)?;
    let graph = build_aoa_graph(&records, config.verbosity);
    let result = compute_times(&graph, config.verbosity)?;
    Ok(CpmSchedule { graph, result })
}

/// Parse raw rows, then run `compute_schedule`.
pub fn schedule_rows(
    rows: &[RawRow],
    parser_config: &ParserConfig,
    config: &ScheduleConfig,
) -> Result<CpmSchedule, CpmError> {
    let records = parse_rows(rows, parser_config)?;
    compute_schedule(&records, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str, &str)]) -> Vec<RawRow> {
        data.iter()
            .map(|(id, dur, preds)| RawRow::new(*id, *dur, *preds))
            .collect()
    }

    fn textbook_rows() -> Vec<RawRow> {
        rows(&[
            ("A", "5", "-"),
            ("B", "3", "A"),
            ("C", "2", "A"),
            ("D", "4", "B, C"),
            ("E", "6", "D"),
        ])
    }

    #[test]
    fn test_convergent_network() {
        let schedule =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();

        // One merge event for D, fed by a dummy from B's end and one from C's end
        assert_eq!(schedule.graph.event_count(), 7);
        assert_eq!(schedule.graph.dummy_count(), 2);
        assert_eq!(schedule.result.project_duration, 18.0);
        assert_eq!(schedule.result.critical_path, vec!["A", "B", "D", "E"]);

        let c = schedule.result.timing("C").unwrap();
        assert_eq!(c.earliest_start, 5.0);
        assert_eq!(c.earliest_finish, 7.0);
        assert_eq!(c.latest_start, 6.0);
        assert_eq!(c.latest_finish, 8.0);
        assert_eq!(c.slack, 1.0);

        let d = schedule.result.timing("D").unwrap();
        assert_eq!((d.earliest_start, d.latest_finish), (8.0, 12.0));
    }

    #[test]
    fn test_single_activity() {
        let records = vec![ActivityRecord::new("A", 5.0, &[])];
        let schedule = compute_schedule(&records, &ScheduleConfig::default()).unwrap();

        assert_eq!(schedule.graph.event_count(), 2);
        assert_eq!(schedule.graph.activity_count(), 1);
        assert_eq!(schedule.graph.dummy_count(), 0);
        assert_eq!(schedule.result.project_duration, 5.0);
        assert_eq!(schedule.result.critical_path, vec!["A"]);
        assert_eq!(schedule.result.timing("A").unwrap().slack, 0.0);
    }

    #[test]
    fn test_mutual_dependency_is_a_cycle() {
        let input = rows(&[("X", "2", "Y"), ("Y", "3", "X")]);
        let err = schedule_rows(&input, &ParserConfig::default(), &ScheduleConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            CpmError::CycleDetected(vec!["X".to_string(), "Y".to_string()])
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let first =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();
        let second =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_project_duration_matches_terminal_finishes() {
        let schedule =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();
        let graph = &schedule.graph;

        let max_terminal_ef = schedule
            .result
            .activities
            .iter()
            .filter(|t| {
                graph
                    .event(t.to_event)
                    .map(|e| e.outgoing.is_empty())
                    .unwrap_or(false)
            })
            .map(|t| t.earliest_finish)
            .fold(0.0, f64::max);
        assert_eq!(max_terminal_ef, schedule.result.project_duration);
    }

    #[test]
    fn test_dummy_edges_never_critical() {
        let schedule =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();
        for edge in schedule.graph.edges().iter().filter(|e| e.is_dummy()) {
            assert_eq!(edge.duration(), 0.0);
            assert!(!schedule.result.critical_path.contains(&edge.label()));
        }
        assert_eq!(schedule.result.activities.len(), 5);
    }

    #[test]
    fn test_unknown_predecessor_policies() {
        let input = rows(&[("A", "2", "-"), ("B", "3", "A, Z")]);

        let err = schedule_rows(&input, &ParserConfig::default(), &ScheduleConfig::default())
            .unwrap_err();
        assert!(matches!(err, CpmError::UnknownPredecessor { .. }));

        let lenient = ScheduleConfig {
            unknown_predecessors: UnknownPredecessorPolicy::Ignore,
            verbosity: 0,
        };
        let schedule = schedule_rows(&input, &ParserConfig::default(), &lenient).unwrap();
        assert_eq!(schedule.result.project_duration, 5.0);
        assert_eq!(schedule.graph.dummy_count(), 0);
    }

    #[test]
    fn test_ignored_predecessors_start_at_initial_event() {
        let input = rows(&[("A", "2", "-"), ("B", "3", "Z")]);
        let lenient = ScheduleConfig {
            unknown_predecessors: UnknownPredecessorPolicy::Ignore,
            verbosity: 0,
        };
        let schedule = schedule_rows(&input, &ParserConfig::default(), &lenient).unwrap();

        // B shares E1 with A instead of getting a start event of its own
        assert_eq!(schedule.graph.event_count(), 3);
        let b = schedule.result.timing("B").unwrap();
        assert_eq!(b.from_event, 0);
        assert_eq!((b.earliest_start, b.slack), (0.0, 0.0));
        assert_eq!(schedule.result.timing("A").unwrap().slack, 1.0);
    }

    #[test]
    fn test_malformed_row_surfaces() {
        let input = rows(&[("A", "2", "-"), ("B", "x", "A")]);
        let err = schedule_rows(&input, &ParserConfig::default(), &ScheduleConfig::default())
            .unwrap_err();
        assert!(matches!(err, CpmError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_forward_reference_surfaces() {
        let records = vec![
            ActivityRecord::new("B", 1.0, &["A"]),
            ActivityRecord::new("A", 1.0, &[]),
        ];
        let err = compute_schedule(&records, &ScheduleConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Activity 'B' references 'A' before it is declared"
        );
    }

    #[test]
    fn test_empty_project() {
        let schedule = compute_schedule(&[], &ScheduleConfig::default()).unwrap();
        assert_eq!(schedule.graph.event_count(), 1);
        assert_eq!(schedule.result.project_duration, 0.0);
        assert!(schedule.result.critical_path.is_empty());
    }

    #[test]
    fn test_large_fractional_durations_schedule_cleanly() {
        let input = rows(&[
            ("A", "675685.5", "-"),
            ("B", "688847.9", "A"),
            ("C", "558423.3", "B"),
            ("D", "140718.5", "C"),
            ("E", "70077.3", "D"),
            ("F", "509933.7", "E"),
            ("G", "120000.25", "A"),
        ]);
        let schedule =
            schedule_rows(&input, &ParserConfig::default(), &ScheduleConfig::default()).unwrap();

        assert_eq!(schedule.result.critical_path, vec!["A", "B", "C", "D", "E", "F"]);
        assert!(schedule.result.activities.iter().all(|t| t.slack >= 0.0));
        assert!(!schedule.result.timing("G").unwrap().is_critical());
    }

    #[test]
    fn test_calendar_overflow_is_an_error() {
        let records = vec![ActivityRecord::new("A", 1e9, &[])];
        let schedule = compute_schedule(&records, &ScheduleConfig::default()).unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let err = schedule.result.calendar(start).unwrap_err();
        assert!(err.to_string().contains("outside the supported date range"));
        assert!(schedule.result.finish_date(start).is_err());
    }

    #[test]
    fn test_table_output() {
        let schedule =
            schedule_rows(&textbook_rows(), &ParserConfig::default(), &ScheduleConfig::default())
                .unwrap();
        let text = schedule.result.to_string();

        assert!(text.contains("Project duration: 18"));
        assert!(text.ends_with("Critical path: A → B → D → E"));
        let table = schedule.result.table();
        assert_eq!(table[3].activity, "D");
        assert_eq!(table[3].from_event, "E5");
        assert_eq!(table[3].to_event, "E6");
    }
}
