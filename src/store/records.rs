//! Storage records for repositories and issues

use chrono::{DateTime, Utc};

use crate::client::models::IssueState;

/// One repository, keyed by (org, name)
#[derive(Debug, Clone, PartialEq)]
pub struct RepoRecord {
    pub org: String,
    pub name: String,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub language: Option<String>,
    pub stars: i64,
    pub forks: i64,
    pub open_issues: i64,
    /// SPDX identifier, when the repo declares a license
    pub license: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepoRecord {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

/// One issue, keyed by (repo full name, number)
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    pub repo: String,
    pub number: i64,
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
}
