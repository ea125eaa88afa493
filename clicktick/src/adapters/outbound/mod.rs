mod clickup;
mod dev_backend;
mod indicator;

pub use self::clickup::ClickUpAdapter;
pub use dev_backend::{Call, DevBackend};
pub use indicator::*;
