use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::queries::{MAX_SEARCH_PAGE, REPOSITORY_DETAILS, SEARCH_TOP_REPOSITORIES};
use super::types::{
    DetailBatch, FetchFailure, GraphQlRequest, GraphQlResponse, RepositoryData, RepositoryDetail,
    RepositorySummary, SearchData, SearchNode,
};
use crate::config::Settings;
use crate::error::{Result, SnapshotError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: reqwest::Client,
    endpoint: String,
    delay: Duration,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let token = settings.token()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            SnapshotError::Configuration("GITHUB_TOKEN is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.github.endpoint.clone(),
            delay: settings.rate_limit_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = GraphQlRequest { query, variables };
        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SnapshotError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: GraphQlResponse<T> = serde_json::from_slice(&bytes)?;
        let messages: Vec<String> = envelope
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        match envelope.data {
            Some(data) => {
                if !messages.is_empty() {
                    debug!(?messages, "GraphQL response carried errors alongside data");
                }
                Ok(data)
            }
            None if messages.is_empty() => Err(SnapshotError::GraphQl {
                messages: vec!["response carried no data".to_string()],
            }),
            None => Err(SnapshotError::GraphQl { messages }),
        }
    }

    /// Most-starred repositories. `count` is clamped to one search page and
    /// whatever the API returns is authoritative; a short page is not topped up.
    pub async fn fetch_top_repositories(&self, count: u32) -> Result<Vec<RepositorySummary>> {
        let first = search_page_size(count);
        if first < count {
            debug!(requested = count, first, "clamped repository count to one search page");
        }

        let data: SearchData = self
            .post(SEARCH_TOP_REPOSITORIES, Some(json!({ "first": first })))
            .await?;

        let summaries: Vec<RepositorySummary> = data
            .search
            .nodes
            .into_iter()
            .filter_map(SearchNode::into_summary)
            .collect();

        if summaries.len() < first as usize {
            debug!(requested = first, returned = summaries.len(), "search returned fewer repositories than requested");
        }

        Ok(summaries)
    }

    pub async fn fetch_repository_detail(&self, owner: &str, name: &str) -> Result<RepositoryDetail> {
        let data: RepositoryData = self
            .post(REPOSITORY_DETAILS, Some(json!({ "owner": owner, "name": name })))
            .await?;

        data.repository.ok_or_else(|| SnapshotError::RepositoryNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Fetches details one repository at a time, in input order, sleeping the
    /// configured delay after every attempt. Failed items are reported and
    /// left out of `details`. Cancellation is checked between items only.
    pub async fn fetch_all_details(
        &self,
        summaries: &[RepositorySummary],
        cancel: &CancellationToken,
    ) -> DetailBatch {
        let total = summaries.len();
        let mut batch = DetailBatch::default();

        for (index, summary) in summaries.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(remaining = total - index, "detail fetch cancelled");
                batch.cancelled = true;
                break;
            }

            let position = index + 1;
            match self
                .fetch_repository_detail(&summary.owner_login, &summary.name)
                .await
            {
                Ok(detail) => {
                    println!("{}", progress_line(position, total, summary, None));
                    debug!(repository = %summary.full_name(), "detail fetched");
                    batch.details.push(detail);
                }
                Err(e) => {
                    println!("{}", progress_line(position, total, summary, Some(&e)));
                    warn!(repository = %summary.full_name(), status = ?e.status(), "detail fetch failed: {}", e);
                    batch.failures.push(FetchFailure {
                        owner: summary.owner_login.clone(),
                        name: summary.name.clone(),
                        status: e.status(),
                        reason: e.to_string(),
                    });
                }
            }

            tokio::time::sleep(self.delay).await;
        }

        batch
    }
}

fn search_page_size(count: u32) -> u32 {
    count.min(MAX_SEARCH_PAGE)
}

/// `[3/100] Fetched: owner/name`, or the error for a skipped repository.
fn progress_line(
    position: usize,
    total: usize,
    summary: &RepositorySummary,
    error: Option<&SnapshotError>,
) -> String {
    match error {
        None => format!("[{}/{}] Fetched: {}", position, total, summary.full_name()),
        Some(e) => format!("[{}/{}] Error fetching {}: {}", position, total, summary.full_name(), e),
    }
}
