pub mod address;
pub mod appender;
pub mod auth;
pub mod client;
pub mod fetcher;
pub mod merge;
pub mod resolver;

pub use crate::domain::model::{ListItemView, ListRef, MergeReport, Resolution, Session};
pub use crate::domain::ports::{Transport, XrpcRequest};
pub use crate::utils::error::Result;
