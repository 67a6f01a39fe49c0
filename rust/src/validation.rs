//! Structural checks over the activity list before the event graph is built.
//!
//! Detects, in this order:
//! - duplicate activity ids and invalid durations
//! - predecessor ids no activity declares
//! - circular precedence (including an activity naming itself)
//! - predecessors declared after the activity that references them
//!
//! Cycles are checked before forward references: a mutual reference is
//! reported as a cycle, not as a forward reference.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use thiserror::Error;

use crate::config::{ScheduleConfig, UnknownPredecessorPolicy};
use crate::interner::{ActivityIndex, ActivityInterner};
use crate::log_summary;
use crate::models::ActivityRecord;

/// Errors raised by activity-level validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
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
    /// Activities that could not be ordered, in declaration order.
    #[error("Circular dependency detected among activities: {}", .0.join(", "))]
    CycleDetected(Vec<String>),
}

/// Validate `records` and return them with predecessor lists normalized
/// (repeats removed, unknown references dropped under the `Ignore` policy).
pub fn validate_records(
    records: &[ActivityRecord],
    config: &ScheduleConfig,
) -> Result<Vec<ActivityRecord>, ValidationError> {
    let mut interner = ActivityInterner::with_capacity(records.len());
    for record in records {
        if interner.insert(&record.id).is_none() {
            return Err(ValidationError::DuplicateActivity(record.id.clone()));
        }
        if !record.duration.is_finite() || record.duration < 0.0 {
            return Err(ValidationError::InvalidDuration {
                activity: record.id.clone(),
                duration: record.duration,
            });
        }
    }

    let preds = resolve_predecessors(records, &interner, config)?;
    check_acyclic(&preds, &interner)?;

    for (idx, record) in records.iter().enumerate() {
        if let Some(&late) = preds[idx].iter().find(|&&p| p as usize >= idx) {
            return Err(ValidationError::ForwardReference {
                activity: record.id.clone(),
                predecessor: interner.resolve(late).unwrap_or_default().to_string(),
            });
        }
    }

    Ok(records
        .iter()
        .zip(&preds)
        .map(|(record, pred_ids)| ActivityRecord {
            id: record.id.clone(),
            duration: record.duration,
            predecessor_ids: pred_ids
                .iter()
                .filter_map(|&p| interner.resolve(p))
                .map(str::to_string)
                .collect(),
        })
        .collect())
}

/// Map predecessor ids to indices, applying the unknown-predecessor policy.
fn resolve_predecessors(
    records: &[ActivityRecord],
    interner: &ActivityInterner,
    config: &ScheduleConfig,
) -> Result<Vec<Vec<ActivityIndex>>, ValidationError> {
    let mut resolved = Vec::with_capacity(records.len());

    for record in records {
        let mut seen: FxHashSet<ActivityIndex> = FxHashSet::default();
        let mut pred_ids = Vec::with_capacity(record.predecessor_ids.len());

        for pred in &record.predecessor_ids {
            match interner.get(pred) {
                Some(p) => {
                    if seen.insert(p) {
                        pred_ids.push(p);
                    }
                }
                None => match config.unknown_predecessors {
                    UnknownPredecessorPolicy::Reject => {
                        return Err(ValidationError::UnknownPredecessor {
                            activity: record.id.clone(),
                            predecessor: pred.clone(),
                        });
                    }
                    UnknownPredecessorPolicy::Ignore => {
                        log_summary!(
                            config.verbosity,
                            "Dropping unknown predecessor '{}' of activity '{}'",
                            pred,
                            record.id
                        );
                    }
                },
            }
        }
        resolved.push(pred_ids);
    }

    Ok(resolved)
}

/// Kahn's algorithm over the activity precedence graph.
fn check_acyclic(
    preds: &[Vec<ActivityIndex>],
    interner: &ActivityInterner,
) -> Result<(), ValidationError> {
    let n = preds.len();
    let mut in_degree: Vec<usize> = preds.iter().map(Vec::len).collect();
    let mut dependents: Vec<Vec<ActivityIndex>> = vec![Vec::new(); n];
    for (idx, pred_ids) in preds.iter().enumerate() {
        for &p in pred_ids {
            dependents[p as usize].push(idx as ActivityIndex);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0;

    while let Some(idx) = queue.pop_front() {
        visited += 1;
        for &dependent in &dependents[idx] {
            let d = dependent as usize;
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push_back(d);
            }
        }
    }

    if visited != n {
        let stuck = (0..n)
            .filter(|&i| in_degree[i] > 0)
            .filter_map(|i| interner.resolve(i as ActivityIndex))
            .map(str::to_string)
            .collect();
        return Err(ValidationError::CycleDetected(stuck));
    }

    Ok(())
}
