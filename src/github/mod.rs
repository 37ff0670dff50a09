pub mod client;
pub mod queries;
pub mod types;

pub use client::GitHubClient;
pub use types::{DetailBatch, FetchFailure, RepositoryDetail, RepositorySummary};
