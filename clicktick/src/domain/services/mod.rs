mod entries;
mod timer;

pub use entries::{aggregate, EntryService, Snapshot, DEFAULT_LOOKBACK_DAYS, MAX_ENTRIES};
pub use timer::{StatusRx, StatusTx, TimerService};
