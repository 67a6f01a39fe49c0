//! Topological ordering of events (Kahn's algorithm).
//!
//! Computed once per schedule and walked forwards for earliest times and
//! backwards for latest times.

use std::collections::VecDeque;

use crate::graph::{event_label, EventGraph, EventId};

use super::PropagationError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    order: Vec<EventId>,
    /// position[event] = index of the event in `order`.
    position: Vec<usize>,
}

impl Topology {
    pub fn order(&self) -> &[EventId] {
        &self.order
    }

    pub fn position(&self, event: EventId) -> usize {
        self.position[event as usize]
    }
}

/// Order events so every edge points forward.
///
/// Ties are broken by event id, so the order is deterministic.
pub fn topological_order(graph: &EventGraph) -> Result<Topology, PropagationError> {
    let n = graph.event_count();
    let mut in_degree: Vec<usize> = graph.events().iter().map(|e| e.incoming.len()).collect();

    let mut queue: VecDeque<EventId> = (0..n)
        .filter(|&i| in_degree[i] == 0)
        .map(|i| i as EventId)
        .collect();
    let mut order: Vec<EventId> = Vec::with_capacity(n);

    while let Some(event) = queue.pop_front() {
        order.push(event);
        for &edge_id in &graph.events()[event as usize].outgoing {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let target = edge.to as usize;
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                queue.push_back(edge.to);
            }
        }
    }

    if order.len() != n {
        let stuck = (0..n)
            .filter(|&i| in_degree[i] > 0)
            .map(|i| event_label(i as EventId))
            .collect();
        return Err(PropagationError::CycleDetected(stuck));
    }

    let mut position = vec![0; n];
    for (pos, &event) in order.iter().enumerate() {
        position[event as usize] = pos;
    }

    Ok(Topology { order, position })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_point_forward() {
        let mut graph = EventGraph::new();
        let e1 = graph.add_event();
        let e2 = graph.add_event();
        let e3 = graph.add_event();
        // Insert edges against id order: e3 comes before e2
        graph.add_activity(e1, e3, "A", 1.0).unwrap();
        graph.add_activity(e3, e2, "B", 1.0).unwrap();

        let topo = topological_order(&graph).unwrap();
        assert_eq!(topo.order(), &[e1, e3, e2]);
        for edge in graph.edges() {
            assert!(topo.position(edge.from) < topo.position(edge.to));
        }
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = EventGraph::new();
        let e1 = graph.add_event();
        let e2 = graph.add_event();
        let e3 = graph.add_event();
        graph.add_activity(e1, e2, "A", 1.0).unwrap();
        graph.add_activity(e2, e3, "B", 1.0).unwrap();
        graph.add_dummy(e3, e2).unwrap();

        assert_eq!(
            topological_order(&graph),
            Err(PropagationError::CycleDetected(vec![
                "E2".to_string(),
                "E3".to_string()
            ]))
        );
    }

    #[test]
    fn test_empty_graph() {
        let topo = topological_order(&EventGraph::new()).unwrap();
        assert!(topo.order().is_empty());
    }
}
