//! Raw GitHub API payload shapes
//!
//! Only the fields the ingestion pipeline reads are deserialized; the rest
//! of each payload is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element of a `/orgs/{org}/repos` page
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub full_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub stargazers_count: i64,

    #[serde(default)]
    pub forks_count: i64,

    #[serde(default)]
    pub open_issues_count: i64,

    #[serde(default)]
    pub license: Option<RawLicense>,

    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// License block nested in a repo payload
#[derive(Debug, Clone, Deserialize)]
pub struct RawLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// One element of a `/repos/{owner}/{repo}/issues` page.
///
/// GitHub returns pull requests on the issues endpoint too, marked by the
/// presence of a `pull_request` block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub number: i64,
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Issue state as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}
