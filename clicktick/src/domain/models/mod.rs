mod entry;
mod ids;
mod status;

pub use entry::*;
pub use ids::*;
pub use status::*;
