//! Activity-on-arrow event graph and its builder.

mod builder;
mod types;

pub use builder::{build_aoa_graph, AoaBuilder};
pub use types::{event_label, ActivityEdge, EdgeId, EdgeKind, Event, EventGraph, EventId, GraphError};
