mod envelope;
mod loose;
mod time_entry;

pub use envelope::*;
pub use loose::*;
pub use time_entry::*;
