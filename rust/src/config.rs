//! Configuration types for parsing and scheduling.

use std::fmt;
use std::str::FromStr;

/// What to do with a predecessor id that no activity in the list declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownPredecessorPolicy {
    /// Fail with `UnknownPredecessor`.
    #[default]
    Reject,
    /// Drop the reference and keep going (logged at summary verbosity).
    ///
    /// An activity left with no predecessors starts at the initial event
    /// `E1` rather than at a start event of its own. Times are the same
    /// either way; the event count is one lower per such activity.
    Ignore,
}

impl FromStr for UnknownPredecessorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("Unknown predecessor policy: {}", other)),
        }
    }
}

impl fmt::Display for UnknownPredecessorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Ignore => write!(f, "ignore"),
        }
    }
}

/// Configuration for turning raw rows into activity records.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Tokens meaning "no predecessor". A blank field always means none.
    pub empty_markers: Vec<String>,
    /// Separator between predecessor ids.
    pub separator: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            empty_markers: vec!["-".to_string()],
            separator: ',',
        }
    }
}

impl ParserConfig {
    /// True if `token` (already trimmed) stands for "no predecessor".
    pub fn is_empty_marker(&self, token: &str) -> bool {
        token.is_empty() || self.empty_markers.iter().any(|m| m.trim() == token)
    }
}

/// Configuration for building and scheduling the event graph.
#[derive(Clone, Debug, Default)]
pub struct ScheduleConfig {
    pub unknown_predecessors: UnknownPredecessorPolicy,
    /// Verbosity level: 0=silent, 1=summary, 2=steps, 3=debug.
    pub verbosity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let parser = ParserConfig::default();
        assert_eq!(parser.separator, ',');
        assert!(parser.is_empty_marker("-"));
        assert!(parser.is_empty_marker(""));
        assert!(!parser.is_empty_marker("A"));

        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.unknown_predecessors, UnknownPredecessorPolicy::Reject);
        assert_eq!(schedule.verbosity, 0);
    }

    #[test]
    fn test_custom_empty_marker() {
        let parser = ParserConfig {
            empty_markers: vec!["none".to_string(), " n/a ".to_string()],
            separator: ';',
        };
        assert!(parser.is_empty_marker("none"));
        assert!(parser.is_empty_marker("n/a"));
        assert!(!parser.is_empty_marker("-"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "Ignore".parse::<UnknownPredecessorPolicy>(),
            Ok(UnknownPredecessorPolicy::Ignore)
        );
        assert_eq!(
            " reject ".parse::<UnknownPredecessorPolicy>(),
            Ok(UnknownPredecessorPolicy::Reject)
        );
        assert!("strict".parse::<UnknownPredecessorPolicy>().is_err());
        assert_eq!(UnknownPredecessorPolicy::Ignore.to_string(), "ignore");
    }
}
