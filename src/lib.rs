//! Snapshot of the most-starred GitHub repositories: list them through the
//! GraphQL search API, fetch per-repository details one by one, derive age,
//! staleness and issue-closure metrics, and write the result as JSON.

pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;

pub use config::Settings;
pub use error::{Result, SnapshotError};
