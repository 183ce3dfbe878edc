use crate::error::AppError;
use serde::{Deserialize, Serialize};

const KIND_TODO: &str = "T";
const KIND_DEADLINE: &str = "D";
const KIND_EVENT: &str = "E";

/// Variant payload of a task. The shared state (description, completion
/// flag) lives on [`Task`] itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline { end: String },
    Event { start: String, end: String },
}

impl TaskKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ToDo => KIND_TODO,
            Self::Deadline { .. } => KIND_DEADLINE,
            Self::Event { .. } => KIND_EVENT,
        }
    }
}

/// A unit of user-tracked work. Description and variant fields are fixed at
/// construction; the completion flag is the only mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

/// Flat persistence representation of a task, one JSON object on the wire.
/// `field1` holds the deadline end or the event start; `field2` holds the
/// event end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub kind: String,
    pub done: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,
}

fn required_text(value: &str, what: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_task(format!("{what} is required")));
    }
    Ok(trimmed.to_string())
}

impl Task {
    pub fn todo(description: &str) -> Result<Self, AppError> {
        Ok(Self {
            description: required_text(description, "description")?,
            done: false,
            kind: TaskKind::ToDo,
        })
    }

    pub fn deadline(description: &str, end: &str) -> Result<Self, AppError> {
        Ok(Self {
            description: required_text(description, "description")?,
            done: false,
            kind: TaskKind::Deadline {
                end: required_text(end, "end date")?,
            },
        })
    }

    pub fn event(description: &str, start: &str, end: &str) -> Result<Self, AppError> {
        Ok(Self {
            description: required_text(description, "description")?,
            done: false,
            kind: TaskKind::Event {
                start: required_text(start, "start date")?,
                end: required_text(end, "end date")?,
            },
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    /// Case-insensitive containment check used by search.
    pub fn description_contains(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// Display form, e.g. `[D][X] submit report (by: 2024-06-01)`.
    pub fn render(&self) -> String {
        let status = if self.done { "X" } else { " " };
        match &self.kind {
            TaskKind::ToDo => format!("[T][{status}] {}", self.description),
            TaskKind::Deadline { end } => {
                format!("[D][{status}] {} (by: {end})", self.description)
            }
            TaskKind::Event { start, end } => {
                format!("[E][{status}] {} (from: {start} to: {end})", self.description)
            }
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        let (field1, field2) = match &self.kind {
            TaskKind::ToDo => (None, None),
            TaskKind::Deadline { end } => (Some(end.clone()), None),
            TaskKind::Event { start, end } => (Some(start.clone()), Some(end.clone())),
        };

        TaskRecord {
            kind: self.kind.tag().to_string(),
            done: self.done,
            description: self.description.clone(),
            field1,
            field2,
        }
    }

    pub fn from_record(record: &TaskRecord) -> Result<Self, AppError> {
        let mut task = match record.kind.as_str() {
            KIND_TODO => Self::todo(&record.description),
            KIND_DEADLINE => {
                let end = record
                    .field1
                    .as_deref()
                    .ok_or_else(|| AppError::corrupt_record("deadline record is missing its end date"))?;
                Self::deadline(&record.description, end)
            }
            KIND_EVENT => {
                let start = record
                    .field1
                    .as_deref()
                    .ok_or_else(|| AppError::corrupt_record("event record is missing its start date"))?;
                let end = record
                    .field2
                    .as_deref()
                    .ok_or_else(|| AppError::corrupt_record("event record is missing its end date"))?;
                Self::event(&record.description, start, end)
            }
            other => {
                return Err(AppError::corrupt_record(format!(
                    "unrecognized kind tag '{other}'"
                )));
            }
        }
        .map_err(|err| AppError::corrupt_record(err.message().to_string()))?;

        if record.done {
            task.mark_done();
        }

        Ok(task)
    }
}
