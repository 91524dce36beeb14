pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpTransport;
pub use config::{credentials::Credentials, RunSettings};
pub use core::client::XrpcClient;
pub use core::merge::{EmptySourcePolicy, ListMerger};
pub use domain::model::{ListRef, MergeReport, Resolution};
pub use utils::error::{MergeError, Result};
