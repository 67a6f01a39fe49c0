//! Time propagation over the event graph.
//!
//! Forward pass for earliest event times, backward pass for latest event
//! times, then per-activity ES/EF/LS/LF/slack and the critical path.

use crate::graph::{event_label, EdgeKind, EventGraph, EventId};
use crate::{log_debug, log_summary};

use super::result::{slack_tolerance, ActivityTiming, EventTiming, ScheduleResult};
use super::topology::{topological_order, Topology};
use super::PropagationError;

/// Earliest time of every event, indexed by event id.
fn forward_pass(graph: &EventGraph, topo: &Topology, verbosity: u8) -> Vec<f64> {
    let mut earliest = vec![0.0; graph.event_count()];

    for &event in topo.order() {
        let idx = event as usize;
        let mut time: Option<f64> = None;
        for &edge_id in &graph.events()[idx].incoming {
            if let Some(edge) = graph.edge(edge_id) {
                let arrival = earliest[edge.from as usize] + edge.duration();
                time = Some(time.map_or(arrival, |t| t.max(arrival)));
            }
        }
        earliest[idx] = time.unwrap_or(0.0);
        log_debug!(verbosity, "{} earliest={}", event_label(event), earliest[idx]);
    }

    earliest
}

/// Latest time of every event, indexed by event id.
fn backward_pass(
    graph: &EventGraph,
    topo: &Topology,
    project_duration: f64,
    verbosity: u8,
) -> Vec<f64> {
    let mut latest = vec![project_duration; graph.event_count()];

    for &event in topo.order().iter().rev() {
        let idx = event as usize;
        let mut time: Option<f64> = None;
        for &edge_id in &graph.events()[idx].outgoing {
            if let Some(edge) = graph.edge(edge_id) {
                let departure = latest[edge.to as usize] - edge.duration();
                time = Some(time.map_or(departure, |t| t.min(departure)));
            }
        }
        latest[idx] = time.unwrap_or(project_duration);
        log_debug!(verbosity, "{} latest={}", event_label(event), latest[idx]);
    }

    latest
}

/// Compute the schedule of `graph`.
///
/// # Errors
/// * `CycleDetected` if the graph has no topological order
/// * `InconsistentSchedule` if an event or edge ends up with negative float
///   beyond rounding error (see `slack_tolerance`)
pub fn compute_times(graph: &EventGraph, verbosity: u8) -> Result<ScheduleResult, PropagationError> {
    let topo = topological_order(graph)?;

    let earliest = forward_pass(graph, &topo, verbosity);
    let project_duration = earliest.iter().copied().fold(0.0, f64::max);
    let latest = backward_pass(graph, &topo, project_duration, verbosity);
    let tolerance = slack_tolerance(project_duration);

    let events: Vec<EventTiming> = earliest
        .iter()
        .zip(&latest)
        .enumerate()
        .map(|(i, (&earliest_time, &latest_time))| EventTiming {
            event: i as EventId,
            earliest_time,
            latest_time,
        })
        .collect();

    for timing in &events {
        if timing.float() < -tolerance {
            return Err(PropagationError::InconsistentSchedule {
                subject: timing.label(),
                slack: timing.float(),
            });
        }
    }

    let mut activities: Vec<ActivityTiming> = Vec::with_capacity(graph.activity_count());
    for edge in graph.edges() {
        let earliest_start = earliest[edge.from as usize];
        let latest_finish = latest[edge.to as usize];
        let duration = edge.duration();
        let latest_start = latest_finish - duration;
        let slack = latest_start - earliest_start;

        if slack < -tolerance {
            return Err(PropagationError::InconsistentSchedule {
                subject: edge.label(),
                slack,
            });
        }

        if let EdgeKind::Activity { id, .. } = &edge.kind {
            let critical = slack.abs() <= tolerance;
            activities.push(ActivityTiming {
                activity_id: id.clone(),
                from_event: edge.from,
                to_event: edge.to,
                duration,
                earliest_start,
                earliest_finish: earliest_start + duration,
                latest_start,
                latest_finish,
                // Rounding noise below zero is reported as zero
                slack: slack.max(0.0),
                critical,
            });
        }
    }

    let mut critical: Vec<&ActivityTiming> = activities.iter().filter(|t| t.is_critical()).collect();
    // Stable sort keeps insertion order among activities sharing a start event
    critical.sort_by_key(|t| topo.position(t.from_event));
    let critical_path: Vec<String> = critical.iter().map(|t| t.activity_id.clone()).collect();

    log_summary!(
        verbosity,
        "Project duration {}; critical path: {}",
        project_duration,
        critical_path.join(" -> ")
    );

    Ok(ScheduleResult {
        activities,
        events,
        event_order: topo.order().to_vec(),
        project_duration,
        critical_path,
    })
}
