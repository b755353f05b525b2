//! Ingestion orchestrator
//!
//! Walks an organization's repository listing and, for each kept repo, its
//! issue listing, mapping raw payloads to records and upserting them. All
//! retry and resume logic lives below in the walker and transport; this
//! module is only the domain mapping and the nesting of the two walks.

pub mod map;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::client::models::{RawIssue, RawRepo};
use crate::error::Result;
use crate::store::Store;
use crate::walker::{PageHandler, PageWalker};

/// Stream key for an organization's repository listing.
/// Issue streams use the repository full name.
pub fn repo_stream_key(org: &str) -> String {
    format!("{}/_repoPage", org)
}

/// Drives one organization's ingestion
pub struct Ingestor {
    walker: PageWalker,
    store: Arc<dyn Store>,
    issues_per_page: usize,
}

impl Ingestor {
    pub fn new(walker: PageWalker, store: Arc<dyn Store>, issues_per_page: usize) -> Self {
        Self {
            walker,
            store,
            issues_per_page,
        }
    }

    /// Ingest all repositories and their issues for `org`.
    ///
    /// Repos whose last push predates `since` are skipped entirely: not
    /// upserted, and no issue walk is started for them.
    pub async fn run(&self, org: &str, since: Option<DateTime<Utc>>) -> Result<()> {
        log::info!("Fetching repos for org: {}", org);

        let handler = RepoPageHandler {
            walker: self.walker.clone(),
            store: Arc::clone(&self.store),
            org: org.to_string(),
            since,
            issues_per_page: self.issues_per_page,
        };

        self.walker
            .walk::<RawRepo, _>(
                &repo_stream_key(org),
                &format!("/orgs/{}/repos", org),
                None,
                &handler,
            )
            .await
    }
}

struct RepoPageHandler {
    walker: PageWalker,
    store: Arc<dyn Store>,
    org: String,
    since: Option<DateTime<Utc>>,
    issues_per_page: usize,
}

#[async_trait]
impl PageHandler<RawRepo> for RepoPageHandler {
    async fn on_page(&self, repos: Vec<RawRepo>, _page: u32) -> Result<()> {
        for repo in &repos {
            if let Some(since) = self.since
                && map::pushed_before(repo, since)
            {
                log::debug!("Skipping {}, last pushed before {}", repo.full_name, since);
                continue;
            }

            self.store.upsert_repo(&map::map_repo(&self.org, repo)).await?;

            log::info!("Fetching issues for repo: {}", repo.full_name);
            let issue_handler = IssuePageHandler {
                store: Arc::clone(&self.store),
                repo: repo.full_name.clone(),
                per_page_cap: self.issues_per_page,
            };
            self.walker
                .walk::<RawIssue, _>(
                    &repo.full_name,
                    &format!("/repos/{}/{}/issues", self.org, repo.name),
                    None,
                    &issue_handler,
                )
                .await?;
        }
        Ok(())
    }
}

struct IssuePageHandler {
    store: Arc<dyn Store>,
    repo: String,
    per_page_cap: usize,
}

#[async_trait]
impl PageHandler<RawIssue> for IssuePageHandler {
    async fn on_page(&self, issues: Vec<RawIssue>, _page: u32) -> Result<()> {
        // Pull requests are excluded first; the cap applies to what
        // remains and resets on every page.
        for issue in issues
            .iter()
            .filter(|i| !i.is_pull_request())
            .take(self.per_page_cap)
        {
            self.store
                .upsert_issue(&map::map_issue(&self.repo, issue))
                .await?;
        }
        Ok(())
    }
}
