use crate::domain::{
    models::{EntryId, TimerStatus},
    services::Snapshot,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Something the user asked for; turned into a background task by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    Toggle,
    StartSelected,
    Stop,
    ConfirmDelete,
    Refresh,
}

/// Result of a background task, reported back to the event loop.
/// Errors are already rendered for display.
#[derive(Debug)]
pub(super) enum Outcome {
    Refreshed {
        result: Result<Snapshot, String>,
        fetched_at_ms: i64,
    },
    /// The status itself arrives on the status channel.
    Toggled,
    Timer(Result<TimerStatus, String>),
    Deleted(Result<EntryId, String>),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type OutcomeTx = UnboundedSender<Outcome>;
pub(super) type OutcomeRx = UnboundedReceiver<Outcome>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn outcome_channel() -> (OutcomeTx, OutcomeRx) {
    mpsc::unbounded_channel()
}
