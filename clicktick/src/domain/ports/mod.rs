mod indicator;
mod time_tracking;

pub use indicator::*;
pub use time_tracking::*;
