//! Activity parser: raw rows to normalized activity records.
//!
//! Rows keep their input order, which is also the order the graph builder
//! processes them in.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::ParserConfig;
use crate::models::{ActivityRecord, RawRow};

/// Errors raised while parsing rows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// `row` is 1-based.
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

impl ParseError {
    fn malformed(row: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}

fn parse_duration(row: usize, id: &str, raw: &str) -> Result<f64, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::malformed(
            row,
            format!("activity '{}' has no duration", id),
        ));
    }
    let duration: f64 = raw.parse().map_err(|_| {
        ParseError::malformed(
            row,
            format!("activity '{}' has non-numeric duration '{}'", id, raw),
        )
    })?;
    if !duration.is_finite() {
        return Err(ParseError::malformed(
            row,
            format!("activity '{}' has non-finite duration '{}'", id, raw),
        ));
    }
    if duration < 0.0 {
        return Err(ParseError::malformed(
            row,
            format!("activity '{}' has negative duration {}", id, duration),
        ));
    }
    Ok(duration)
}

/// Split a predecessor field into trimmed ids, dropping empty markers and repeats.
pub fn split_predecessors(raw: &str, config: &ParserConfig) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    raw.split(config.separator)
        .map(str::trim)
        .filter(|token| !config.is_empty_marker(token))
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Parse a single row. `row` is the 1-based row number used in errors.
pub fn parse_row(row: usize, raw: &RawRow, config: &ParserConfig) -> Result<ActivityRecord, ParseError> {
    let id = raw.id.trim();
    if id.is_empty() {
        return Err(ParseError::malformed(row, "activity id is empty"));
    }
    let duration = parse_duration(row, id, &raw.duration)?;

    Ok(ActivityRecord {
        id: id.to_string(),
        duration,
        predecessor_ids: split_predecessors(&raw.predecessors, config),
    })
}

/// Parse rows in input order.
///
/// # Errors
/// * `MalformedRow` for an empty or duplicate id, or a missing, non-numeric,
///   non-finite or negative duration
pub fn parse_rows(rows: &[RawRow], config: &ParserConfig) -> Result<Vec<ActivityRecord>, ParseError> {
    let mut seen: FxHashSet<String> =
        FxHashSet::with_capacity_and_hasher(rows.len(), Default::default());
    let mut records = Vec::with_capacity(rows.len());

    for (i, raw) in rows.iter().enumerate() {
        let row = i + 1;
        let record = parse_row(row, raw, config)?;
        if !seen.insert(record.id.clone()) {
            return Err(ParseError::malformed(
                row,
                format!("duplicate activity id '{}'", record.id),
            ));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str, &str)]) -> Vec<RawRow> {
        data.iter()
            .map(|(id, dur, preds)| RawRow::new(*id, *dur, *preds))
            .collect()
    }

    #[test]
    fn test_parse_trims_tokens() {
        let input = rows(&[("  A ", " 5 ", " - "), ("B", "3.5", " A ,  ")]);
        let records = parse_rows(&input, &ParserConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "A");
        assert_eq!(records[0].duration, 5.0);
        assert!(records[0].starts_project());
        assert_eq!(records[1].duration, 3.5);
        assert_eq!(records[1].predecessor_ids, vec!["A".to_string()]);
    }

    #[test]
    fn test_blank_predecessors_mean_none() {
        let input = rows(&[("A", "1", ""), ("B", "1", "   ")]);
        let records = parse_rows(&input, &ParserConfig::default()).unwrap();
        assert!(records.iter().all(|r| r.starts_project()));
    }

    #[test]
    fn test_repeated_predecessor_kept_once() {
        let input = rows(&[("A", "1", "-"), ("B", "1", "-"), ("C", "1", "B, A, B")]);
        let records = parse_rows(&input, &ParserConfig::default()).unwrap();
        assert_eq!(records[2].predecessor_ids, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_custom_separator_and_marker() {
        let config = ParserConfig {
            empty_markers: vec!["none".to_string()],
            separator: ';',
        };
        let input = rows(&[("A", "2", "none"), ("B", "2", "none"), ("C", "1", "A; B")]);
        let records = parse_rows(&input, &config).unwrap();
        assert!(records[0].starts_project());
        assert_eq!(
            records[2].predecessor_ids,
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_missing_duration() {
        let input = rows(&[("A", "5", "-"), ("B", "  ", "A")]);
        let err = parse_rows(&input, &ParserConfig::default()).unwrap_err();
        let ParseError::MalformedRow { row, reason } = err;
        assert_eq!(row, 2);
        assert!(reason.contains("no duration"));
    }

    #[test]
    fn test_non_numeric_duration() {
        let input = rows(&[("A", "five", "-")]);
        let err = parse_rows(&input, &ParserConfig::default()).unwrap_err();
        assert!(err.to_string().contains("non-numeric duration 'five'"));
    }

    #[test]
    fn test_negative_and_nan_duration() {
        let config = ParserConfig::default();
        assert!(parse_rows(&rows(&[("A", "-1", "-")]), &config).is_err());
        assert!(parse_rows(&rows(&[("A", "NaN", "-")]), &config).is_err());
        assert!(parse_rows(&rows(&[("A", "inf", "-")]), &config).is_err());
    }

    #[test]
    fn test_empty_id() {
        let err = parse_rows(&rows(&[("  ", "1", "-")]), &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedRow {
                row: 1,
                reason: "activity id is empty".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_id() {
        let input = rows(&[("A", "1", "-"), ("B", "1", "A"), (" A", "2", "-")]);
        let err = parse_rows(&input, &ParserConfig::default()).unwrap_err();
        let ParseError::MalformedRow { row, reason } = err;
        assert_eq!(row, 3);
        assert!(reason.contains("duplicate activity id 'A'"));
    }

    #[test]
    fn test_zero_duration_allowed() {
        let records = parse_rows(&rows(&[("M", "0", "-")]), &ParserConfig::default()).unwrap();
        assert_eq!(records[0].duration, 0.0);
    }
}
