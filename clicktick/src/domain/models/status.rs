use serde::Serialize;
use std::fmt;

use super::TaskId;

/// Outcome of a timer action, as shown to the user and pushed on the status
/// channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerStatus {
    Started {
        task_id: TaskId,
        task_name: Option<String>,
    },
    Stopped {
        task_id: Option<TaskId>,
        task_name: Option<String>,
    },
    Error {
        message: String,
    },
}

/// Wire shape of a [`TimerStatus`]: `{action, task_id, task_name}`. Errors
/// carry their message in `task_name`.
#[derive(Debug, Serialize)]
pub struct StatusPayload<'a> {
    pub action: &'static str,
    pub task_id: Option<&'a str>,
    pub task_name: Option<&'a str>,
}

impl TimerStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, TimerStatus::Started { .. })
    }

    pub fn action(&self) -> &'static str {
        match self {
            TimerStatus::Started { .. } => "started",
            TimerStatus::Stopped { .. } => "stopped",
            TimerStatus::Error { .. } => "error",
        }
    }

    pub fn payload(&self) -> StatusPayload<'_> {
        let (task_id, task_name) = match self {
            TimerStatus::Started { task_id, task_name } => {
                (Some(task_id.as_str()), task_name.as_deref())
            }
            TimerStatus::Stopped { task_id, task_name } => {
                (task_id.as_ref().map(TaskId::as_str), task_name.as_deref())
            }
            TimerStatus::Error { message } => (None, Some(message.as_str())),
        };
        StatusPayload {
            action: self.action(),
            task_id,
            task_name,
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = self.payload();
        match self {
            TimerStatus::Error { message } if message.is_empty() => write!(f, "✗ error"),
            TimerStatus::Error { message } => write!(f, "✗ {}", message),
            _ => write!(
                f,
                "✓ {}: {} ({})",
                payload.action,
                payload.task_name.unwrap_or_default(),
                payload.task_id.unwrap_or_default()
            ),
        }
    }
}
