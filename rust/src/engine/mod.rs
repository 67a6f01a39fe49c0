//! Time propagation and critical path engine.
//!
//! Runs over an `EventGraph` in three steps: topological order (computed once),
//! forward and backward passes over event times, then per-activity derivation.

mod propagation;
mod result;
mod topology;

use thiserror::Error;

pub use propagation::compute_times;
pub use result::{
    slack_tolerance, ActivityTiming, CalendarError, CalendarRow, EventTiming, ScheduleResult,
    ScheduleRow, SLACK_EPSILON, TABLE_COLUMNS,
};
pub use topology::{topological_order, Topology};

/// Errors raised while propagating times.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    /// Events that could not be ordered.
    #[error("Circular dependency detected among events: {}", .0.join(", "))]
    CycleDetected(Vec<String>),
    /// Negative float on an event or edge.
    #[error("Inconsistent schedule: {subject} has negative slack {slack}")]
    InconsistentSchedule { subject: String, slack: f64 },
}
