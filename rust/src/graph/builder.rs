//! Activity-on-arrow graph builder.
//!
//! Activities are added in declaration order. Each one gets a fresh end event.
//! Its start event is:
//! - the initial event `E1` if it has no (resolvable) predecessors
//! - the shared end event, if every predecessor finishes at the same event
//! - otherwise a fresh event, fed by one dummy edge from each distinct
//!   predecessor end event

use crate::models::ActivityRecord;
use crate::{log_steps, log_summary};

use super::types::{event_label, EdgeId, EdgeKind, EventGraph, EventId};

/// Build-time context. Event numbering lives here, so every build starts from `E1`.
#[derive(Debug)]
pub struct AoaBuilder {
    graph: EventGraph,
    initial: EventId,
    verbosity: u8,
}

impl AoaBuilder {
    pub fn new(verbosity: u8) -> Self {
        let mut graph = EventGraph::new();
        let initial = graph.add_event();
        Self {
            graph,
            initial,
            verbosity,
        }
    }

    /// End events of the given predecessors, de-duplicated in first-appearance order.
    /// Predecessors without an edge yet are skipped.
    fn predecessor_end_events(&self, record: &ActivityRecord) -> Vec<EventId> {
        let mut ends: Vec<EventId> = Vec::with_capacity(record.predecessor_ids.len());
        for pred in &record.predecessor_ids {
            match self.graph.activity_edge(pred) {
                Some(edge) => {
                    if !ends.contains(&edge.to) {
                        ends.push(edge.to);
                    }
                }
                None => {
                    log_steps!(
                        self.verbosity,
                        "Activity '{}': predecessor '{}' not yet declared, skipped",
                        record.id,
                        pred
                    );
                }
            }
        }
        ends
    }

    /// Add one activity and return the id of its edge.
    pub fn add_activity(&mut self, record: &ActivityRecord) -> EdgeId {
        let pred_ends = self.predecessor_end_events(record);

        let start = match pred_ends.as_slice() {
            // Also covers activities whose predecessors were all dropped
            [] => self.initial,
            [shared] => *shared,
            many => {
                let merge = self.graph.add_event();
                for &end in many {
                    self.graph.push_edge(end, merge, EdgeKind::Dummy);
                }
                log_steps!(
                    self.verbosity,
                    "Activity '{}': {} predecessor events merged into {} via dummies",
                    record.id,
                    many.len(),
                    event_label(merge)
                );
                merge
            }
        };

        let end = self.graph.add_event();
        log_steps!(
            self.verbosity,
            "Activity '{}' ({}): {} -> {}",
            record.id,
            record.duration,
            event_label(start),
            event_label(end)
        );
        self.graph.push_edge(
            start,
            end,
            EdgeKind::Activity {
                id: record.id.clone(),
                duration: record.duration,
            },
        )
    }

    pub fn finish(self) -> EventGraph {
        log_summary!(
            self.verbosity,
            "Built event graph: {} events, {} activities, {} dummies",
            self.graph.event_count(),
            self.graph.activity_count(),
            self.graph.dummy_count()
        );
        self.graph
    }
}

/// Build the event graph for `records`, processed in order.
///
/// Predecessor ids that do not name an earlier activity are skipped; run
/// `validation::validate_records` first for strict handling.
pub fn build_aoa_graph(records: &[ActivityRecord], verbosity: u8) -> EventGraph {
    let mut builder = AoaBuilder::new(verbosity);
    for record in records {
        builder.add_activity(record);
    }
    builder.finish()
}
