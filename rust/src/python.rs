//! Python bindings (`aoa_cpm` module).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{ParserConfig, ScheduleConfig, UnknownPredecessorPolicy};
use crate::engine::ScheduleResult;
use crate::graph::event_label;
use crate::models::RawRow;

/// One schedule table row (PyO3 wrapper).
#[pyclass(name = "ScheduleRow")]
#[derive(Clone, Debug)]
pub struct PyScheduleRow {
    #[pyo3(get)]
    pub activity: String,
    #[pyo3(get)]
    pub from_event: String,
    #[pyo3(get)]
    pub to_event: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub es: f64,
    #[pyo3(get)]
    pub ef: f64,
    #[pyo3(get)]
    pub ls: f64,
    #[pyo3(get)]
    pub lf: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl PyScheduleRow {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleRow(activity={:?}, {}->{}, es={}, lf={}, slack={})",
            self.activity, self.from_event, self.to_event, self.es, self.lf, self.slack
        )
    }
}

/// Result of `compute_schedule` (PyO3 wrapper).
#[pyclass(name = "Schedule")]
#[derive(Clone, Debug)]
pub struct PySchedule {
    #[pyo3(get)]
    pub rows: Vec<PyScheduleRow>,
    #[pyo3(get)]
    pub project_duration: f64,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Event labels in topological order.
    #[pyo3(get)]
    pub event_order: Vec<String>,
    /// (label, from_event, to_event, duration, is_dummy) for every edge.
    #[pyo3(get)]
    pub edges: Vec<(String, String, String, f64, bool)>,
    result: ScheduleResult,
}

#[pymethods]
impl PySchedule {
    /// (activity, early_start, early_finish, late_start, late_finish) as dates.
    ///
    /// Raises ValueError if a date falls outside the supported range.
    fn calendar(
        &self,
        start: NaiveDate,
    ) -> PyResult<Vec<(String, NaiveDate, NaiveDate, NaiveDate, NaiveDate)>> {
        let rows = self
            .result
            .calendar(start)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.activity,
                    r.early_start,
                    r.early_finish,
                    r.late_start,
                    r.late_finish,
                )
            })
            .collect())
    }

    /// Project finish date, counting time units as days from `start`.
    fn finish_date(&self, start: NaiveDate) -> PyResult<NaiveDate> {
        self.result
            .finish_date(start)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __str__(&self) -> String {
        self.result.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(activities={}, project_duration={}, critical_path={:?})",
            self.rows.len(),
            self.project_duration,
            self.critical_path
        )
    }
}

/// Compute a CPM schedule from `(id, duration, predecessors)` string rows.
///
/// # Raises
/// * ValueError for malformed rows, unknown predecessors (policy "reject"),
///   cycles, forward references or an inconsistent schedule
#[pyfunction]
#[pyo3(name = "compute_schedule")]
#[pyo3(signature = (rows, empty_markers=None, unknown_predecessors="reject", verbosity=0))]
fn py_compute_schedule(
    rows: Vec<(String, String, String)>,
    empty_markers: Option<Vec<String>>,
    unknown_predecessors: &str,
    verbosity: u8,
) -> PyResult<PySchedule> {
    let defaults = ParserConfig::default();
    let parser_config = ParserConfig {
        empty_markers: empty_markers.unwrap_or(defaults.empty_markers),
        separator: defaults.separator,
    };
    let unknown_predecessors: UnknownPredecessorPolicy = unknown_predecessors
        .parse()
        .map_err(PyValueError::new_err)?;
    let config = ScheduleConfig {
        unknown_predecessors,
        verbosity,
    };

    let raw_rows: Vec<RawRow> = rows
        .into_iter()
        .map(|(id, duration, predecessors)| RawRow {
            id,
            duration,
            predecessors,
        })
        .collect();

    let schedule = crate::schedule_rows(&raw_rows, &parser_config, &config)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let rows = schedule
        .result
        .activities
        .iter()
        .map(|t| PyScheduleRow {
            activity: t.activity_id.clone(),
            from_event: event_label(t.from_event),
            to_event: event_label(t.to_event),
            duration: t.duration,
            es: t.earliest_start,
            ef: t.earliest_finish,
            ls: t.latest_start,
            lf: t.latest_finish,
            slack: t.slack,
            is_critical: t.is_critical(),
        })
        .collect();

    let edges = schedule
        .graph
        .edges()
        .iter()
        .map(|e| {
            (
                e.label(),
                event_label(e.from),
                event_label(e.to),
                e.duration(),
                e.is_dummy(),
            )
        })
        .collect();

    Ok(PySchedule {
        rows,
        project_duration: schedule.result.project_duration,
        critical_path: schedule.result.critical_path.clone(),
        event_order: schedule
            .result
            .event_order
            .iter()
            .map(|&e| event_label(e))
            .collect(),
        edges,
        result: schedule.result,
    })
}

/// The aoa_cpm Python module.
#[pymodule]
fn aoa_cpm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyScheduleRow>()?;
    m.add_class::<PySchedule>()?;
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    Ok(())
}
