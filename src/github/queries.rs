//! GraphQL documents sent to the API. Kept verbatim so the field selection
//! stays in step with the response types in `types.rs`.

/// Largest `first` the search connection accepts; anything above is rejected
/// with a GraphQL error rather than truncated.
pub const MAX_SEARCH_PAGE: u32 = 100;

/// Most-starred repositories, at most `MAX_SEARCH_PAGE` per request.
pub const SEARCH_TOP_REPOSITORIES: &str = r#"
query($first: Int!) {
  search(
    query: "stars:>1 sort:stars-desc"
    type: REPOSITORY
    first: $first
  ) {
    nodes {
      ... on Repository {
        name
        owner {
          login
        }
      }
    }
  }
}
"#;

pub const REPOSITORY_DETAILS: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    name
    createdAt
    updatedAt
    pushedAt
    stargazerCount

    primaryLanguage {
      name
    }

    releases {
      totalCount
    }

    issues {
      totalCount
    }

    closedIssues: issues(states: CLOSED) {
      totalCount
    }

    pullRequests(states: MERGED) {
      totalCount
    }
  }
}
"#;
