use serde::{Deserialize, Serialize};

/// One hit of the top-repositories search. Only used to drive detail fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub owner_login: String,
}

impl RepositorySummary {
    pub fn new(owner_login: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_login: owner_login.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_login, self.name)
    }
}

/// `data.repository` exactly as the detail query returns it.
///
/// Everything but `name` is optional on the wire. Missing values are kept as
/// `None` and rejected by the metrics calculator rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub stargazer_count: Option<u64>,
    pub primary_language: Option<Language>,
    pub releases: Option<TotalCount>,
    pub issues: Option<TotalCount>,
    pub closed_issues: Option<TotalCount>,
    pub pull_requests: Option<TotalCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

impl RepositoryDetail {
    pub fn primary_language_name(&self) -> Option<&str> {
        self.primary_language.as_ref().map(|l| l.name.as_str())
    }

    pub fn release_count(&self) -> Option<u64> {
        self.releases.map(|c| c.total_count)
    }

    pub fn total_issues(&self) -> Option<u64> {
        self.issues.map(|c| c.total_count)
    }

    pub fn closed_issues(&self) -> Option<u64> {
        self.closed_issues.map(|c| c.total_count)
    }

    pub fn merged_pull_requests(&self) -> Option<u64> {
        self.pull_requests.map(|c| c.total_count)
    }
}

/// A detail fetch that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub owner: String,
    pub name: String,
    pub status: Option<u16>,
    pub reason: String,
}

impl FetchFailure {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Result of the detail stage: what was fetched, in input order, plus what
/// was skipped and why.
#[derive(Debug, Default)]
pub struct DetailBatch {
    pub details: Vec<RepositoryDetail>,
    pub failures: Vec<FetchFailure>,
    pub cancelled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub search: SearchConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchConnection {
    #[serde(default)]
    pub nodes: Vec<SearchNode>,
}

/// Non-repository hits come back as `{}` because of the inline fragment.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchNode {
    pub name: Option<String>,
    pub owner: Option<Owner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Owner {
    pub login: String,
}

impl SearchNode {
    pub fn into_summary(self) -> Option<RepositorySummary> {
        match (self.name, self.owner) {
            (Some(name), Some(owner)) => Some(RepositorySummary::new(owner.login, name)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryData {
    pub repository: Option<RepositoryDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_from_wire() {
        let detail: RepositoryDetail = serde_json::from_value(json!({
            "name": "react",
            "createdAt": "2013-05-24T16:15:54Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "pushedAt": "2024-01-02T00:00:00Z",
            "stargazerCount": 220000,
            "primaryLanguage": { "name": "JavaScript" },
            "releases": { "totalCount": 100 },
            "issues": { "totalCount": 12000 },
            "closedIssues": { "totalCount": 11000 },
            "pullRequests": { "totalCount": 15000 }
        }))
        .unwrap();

        assert_eq!(detail.primary_language_name(), Some("JavaScript"));
        assert_eq!(detail.release_count(), Some(100));
        assert_eq!(detail.total_issues(), Some(12000));
        assert_eq!(detail.closed_issues(), Some(11000));
        assert_eq!(detail.merged_pull_requests(), Some(15000));
    }

    #[test]
    fn test_detail_missing_fields_stay_none() {
        let detail: RepositoryDetail = serde_json::from_value(json!({
            "name": "bare",
            "primaryLanguage": null
        }))
        .unwrap();

        assert_eq!(detail.created_at, None);
        assert_eq!(detail.total_issues(), None);
        assert_eq!(detail.primary_language_name(), None);
    }

    #[test]
    fn test_non_repository_nodes_are_dropped() {
        let data: SearchData = serde_json::from_value(json!({
            "search": { "nodes": [
                { "name": "A", "owner": { "login": "u" } },
                {},
                { "name": "B", "owner": { "login": "v" } }
            ]}
        }))
        .unwrap();

        let summaries: Vec<_> = data
            .search
            .nodes
            .into_iter()
            .filter_map(SearchNode::into_summary)
            .collect();
        assert_eq!(
            summaries,
            vec![RepositorySummary::new("u", "A"), RepositorySummary::new("v", "B")]
        );
        assert_eq!(summaries[1].full_name(), "v/B");
    }

    #[test]
    fn test_request_omits_empty_variables() {
        let body = serde_json::to_value(GraphQlRequest {
            query: "query { viewer { login } }",
            variables: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "query": "query { viewer { login } }" }));
    }
}
