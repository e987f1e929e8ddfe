use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow status of a task.
///
/// Known statuses map onto dedicated variants; anything else is preserved
/// verbatim in [`TaskStatus::Other`] so that newer task sources never fail
/// to load. Status strings are matched case-insensitively and accept `_`,
/// `-` or spaces as separators (`"in_progress"`, `"In Progress"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Other(s) => s,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        Ok(match normalized.as_str() {
            "todo" | "open" => TaskStatus::Todo,
            "inprogress" => TaskStatus::InProgress,
            "done" | "completed" => TaskStatus::Done,
            "blocked" => TaskStatus::Blocked,
            _ => TaskStatus::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses_loosely() {
        assert_eq!(TaskStatus::from("In Progress".to_string()), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from("in-progress".to_string()), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from("DONE".to_string()), TaskStatus::Done);
        assert_eq!(TaskStatus::from("blocked".to_string()), TaskStatus::Blocked);
        assert_eq!(TaskStatus::from("open".to_string()), TaskStatus::Todo);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = TaskStatus::from(" archived ".to_string());
        assert_eq!(status, TaskStatus::Other("archived".to_string()));
        assert_eq!(status.to_string(), "archived");
    }
}
