use thiserror::Error;

pub const NO_CANDIDATE_MESSAGE: &str = "No recent task-backed time entries found";

/// Errors that can occur during time tracking operations.
#[derive(Debug, Error)]
pub enum TimeTrackingError {
    /// A required credential or setting is missing.
    #[error("Missing configuration: {0}")]
    Config(String),
    /// The service answered with a non-success status.
    #[error("HTTP {status} {context}\n{message}")]
    Remote {
        status: u16,
        context: String,
        message: String,
    },
    /// Toggle found nothing to resume in the lookback window.
    #[error("{}", NO_CANDIDATE_MESSAGE)]
    NoCandidate,
    #[error("{0}")]
    Transport(String),
}

impl TimeTrackingError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
