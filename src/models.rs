use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier handed out by a [`TaskStore`](crate::store::TaskStore).
///
/// Ids come from a per-store counter and are never reassigned, even after the
/// task they named has been removed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single scheduled task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: TaskId,
    /// The description of the task. Never empty at creation.
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Local wall-clock date and time the task is scheduled for.
    pub scheduled_at: NaiveDateTime,
}

/// Date-time layouts accepted at the input boundary when nothing else is configured.
pub const DEFAULT_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Parses a user-entered date-time against the given formats.
///
/// An empty entry, or one that matches none of the formats, is treated as
/// absent, the same way a date-time input box reports an empty value for
/// anything it cannot read.
pub fn parse_scheduled<S: AsRef<str>>(input: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f.as_ref()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_datetime_local_layout() {
        let parsed = parse_scheduled("2025-03-05T14:30", &DEFAULT_INPUT_FORMATS);
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parsed, Some(expected));
    }

    #[test]
    fn blank_and_garbage_are_absent() {
        assert_eq!(parse_scheduled("   ", &DEFAULT_INPUT_FORMATS), None);
        assert_eq!(parse_scheduled("tomorrow-ish", &DEFAULT_INPUT_FORMATS), None);
    }

    #[test]
    fn task_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&TaskId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
