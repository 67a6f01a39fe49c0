//! Input data types.

/// One unparsed input row, as handed over by the ingestion layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    pub id: String,
    pub duration: String,
    /// Separator-delimited predecessor ids, or an empty marker.
    pub predecessors: String,
}

impl RawRow {
    pub fn new(
        id: impl Into<String>,
        duration: impl Into<String>,
        predecessors: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            duration: duration.into(),
            predecessors: predecessors.into(),
        }
    }
}

/// A normalized activity. Declaration order matters: predecessors must be
/// declared before the activities that reference them.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecord {
    pub id: String,
    /// Non-negative duration in time units (days in the calendar projection).
    pub duration: f64,
    /// Ordered predecessor ids; empty means the activity starts the project.
    pub predecessor_ids: Vec<String>,
}

impl ActivityRecord {
    pub fn new(id: impl Into<String>, duration: f64, predecessor_ids: &[&str]) -> Self {
        Self {
            id: id.into(),
            duration,
            predecessor_ids: predecessor_ids.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn starts_project(&self) -> bool {
        self.predecessor_ids.is_empty()
    }
}
