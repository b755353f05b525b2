//! Repos/issues store
//!
//! The ingestion engine only needs idempotent upserts keyed on each
//! record's natural key; the `top` command reads back ranked slices. The
//! trait keeps the engine decoupled from the backing database.

pub mod records;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
pub use records::{IssueRecord, RepoRecord};
pub use sqlite::SqliteStore;

/// Ranking metric for the `top` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMetric {
    Stars,
    Issues,
}

/// Storage collaborator for ingested records
#[async_trait]
pub trait Store: Send + Sync {
    /// Create the secondary query indexes. The unique natural-key
    /// constraints exist from schema creation.
    async fn ensure_indexes(&self) -> Result<(), StoreError>;

    /// Insert-or-replace a repository by (org, name)
    async fn upsert_repo(&self, repo: &RepoRecord) -> Result<(), StoreError>;

    /// Insert-or-replace an issue by (repo, number)
    async fn upsert_issue(&self, issue: &IssueRecord) -> Result<(), StoreError>;

    /// Repositories of an org ranked by the metric, highest first
    async fn top_repos(
        &self,
        org: &str,
        metric: TopMetric,
        limit: u32,
    ) -> Result<Vec<RepoRecord>, StoreError>;

    /// Number of stored issues for one repository (diagnostics/tests)
    async fn issue_count(&self, repo: &str) -> Result<u64, StoreError>;
}
