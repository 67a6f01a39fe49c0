//! Arena types for the activity-on-arrow event graph.
//!
//! Events and edges are addressed by dense integer ids; the event with id `n`
//! is labelled `E{n+1}`.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Event (node) id.
pub type EventId = u32;
/// Edge id, in insertion order.
pub type EdgeId = u32;

/// Label an event the way tables and renderers show it.
pub fn event_label(id: EventId) -> String {
    format!("E{}", id + 1)
}

/// Errors raised when editing a graph by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown event id: {0}")]
    UnknownEvent(EventId),
    #[error("Activity '{0}' already has an edge")]
    DuplicateActivity(String),
}

/// What an edge stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeKind {
    Activity { id: String, duration: f64 },
    /// Zero-duration precedence link.
    Dummy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEdge {
    pub from: EventId,
    pub to: EventId,
    pub kind: EdgeKind,
}

impl ActivityEdge {
    pub fn duration(&self) -> f64 {
        match &self.kind {
            EdgeKind::Activity { duration, .. } => *duration,
            EdgeKind::Dummy => 0.0,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, EdgeKind::Dummy)
    }

    pub fn activity_id(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Activity { id, .. } => Some(id),
            EdgeKind::Dummy => None,
        }
    }

    /// Activity id, or `dummy_<from>_<to>` for dummies.
    pub fn label(&self) -> String {
        match &self.kind {
            EdgeKind::Activity { id, .. } => id.clone(),
            EdgeKind::Dummy => format!("dummy_{}_{}", event_label(self.from), event_label(self.to)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    pub incoming: Vec<EdgeId>,
    pub outgoing: Vec<EdgeId>,
}

/// Event graph: events are points in time, edges are activities or dummies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventGraph {
    events: Vec<Event>,
    edges: Vec<ActivityEdge>,
    activity_edges: FxHashMap<String, EdgeId>,
}

impl EventGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self) -> EventId {
        let id = self.events.len() as EventId;
        self.events.push(Event::default());
        id
    }

    /// Add a real activity edge between existing events.
    pub fn add_activity(
        &mut self,
        from: EventId,
        to: EventId,
        id: impl Into<String>,
        duration: f64,
    ) -> Result<EdgeId, GraphError> {
        self.check_event(from)?;
        self.check_event(to)?;
        let id = id.into();
        if self.activity_edges.contains_key(&id) {
            return Err(GraphError::DuplicateActivity(id));
        }
        Ok(self.push_edge(from, to, EdgeKind::Activity { id, duration }))
    }

    /// Add a dummy edge between existing events.
    pub fn add_dummy(&mut self, from: EventId, to: EventId) -> Result<EdgeId, GraphError> {
        self.check_event(from)?;
        self.check_event(to)?;
        Ok(self.push_edge(from, to, EdgeKind::Dummy))
    }

    fn check_event(&self, id: EventId) -> Result<(), GraphError> {
        if (id as usize) < self.events.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownEvent(id))
        }
    }

    /// Append an edge. Callers guarantee both events exist.
    pub(crate) fn push_edge(&mut self, from: EventId, to: EventId, kind: EdgeKind) -> EdgeId {
        let edge_id = self.edges.len() as EdgeId;
        if let EdgeKind::Activity { id, .. } = &kind {
            self.activity_edges.insert(id.clone(), edge_id);
        }
        self.events[from as usize].outgoing.push(edge_id);
        self.events[to as usize].incoming.push(edge_id);
        self.edges.push(ActivityEdge { from, to, kind });
        edge_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn edges(&self) -> &[ActivityEdge] {
        &self.edges
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id as usize)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&ActivityEdge> {
        self.edges.get(id as usize)
    }

    /// Edge carrying the given activity, if any.
    pub fn activity_edge(&self, activity_id: &str) -> Option<&ActivityEdge> {
        self.activity_edges
            .get(activity_id)
            .and_then(|&e| self.edge(e))
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn dummy_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_dummy()).count()
    }

    pub fn activity_count(&self) -> usize {
        self.edges.len() - self.dummy_count()
    }
}
