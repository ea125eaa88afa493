mod clickup_url;
mod client;
pub mod domain;
mod settings;

pub(crate) use clickup_url::*;

pub use client::*;
pub use domain::*;
pub use settings::*;

pub use reqwest::Method;
