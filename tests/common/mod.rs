#![allow(dead_code)]

use serde_json::json;
use std::path::PathBuf;

use top_repos_snapshot::config::{Overrides, Settings};

pub const TOKEN: &str = "ghp_test_token";

pub fn settings(server_url: &str, output: Option<PathBuf>) -> Settings {
    Settings::default().apply(Overrides {
        token: Some(TOKEN.to_string()),
        endpoint: Some(format!("{}/graphql", server_url)),
        rate_limit_delay_ms: Some(0),
        output_path: output,
        no_display: true,
        ..Default::default()
    })
}

/// `(owner, name)` pairs as a search response.
pub fn list_body(repos: &[(&str, &str)]) -> String {
    let nodes: Vec<_> = repos
        .iter()
        .map(|(owner, name)| json!({ "name": name, "owner": { "login": owner } }))
        .collect();
    json!({ "data": { "search": { "nodes": nodes } } }).to_string()
}

pub fn detail_body(name: &str, created_at: &str, total_issues: u64, closed_issues: u64) -> String {
    json!({
        "data": {
            "repository": {
                "name": name,
                "createdAt": created_at,
                "updatedAt": created_at,
                "pushedAt": created_at,
                "stargazerCount": 1000,
                "primaryLanguage": { "name": "Rust" },
                "releases": { "totalCount": 12 },
                "issues": { "totalCount": total_issues },
                "closedIssues": { "totalCount": closed_issues },
                "pullRequests": { "totalCount": 30 }
            }
        }
    })
    .to_string()
}

pub fn detail_vars(owner: &str, name: &str) -> mockito::Matcher {
    mockito::Matcher::PartialJson(json!({ "variables": { "owner": owner, "name": name } }))
}

pub fn list_vars(count: u32) -> mockito::Matcher {
    mockito::Matcher::PartialJson(json!({ "variables": { "first": count } }))
}
