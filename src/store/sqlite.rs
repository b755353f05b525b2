//! SQLite implementation of the store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::records::{IssueRecord, RepoRecord};
use super::{Store, TopMetric};
use crate::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// SQLite-backed store for repos and issues
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Invalid(format!("cannot create store dir: {}", e)))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Natural keys are part of the schema; upserts rely on them.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS repos (
                org TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                topics TEXT NOT NULL DEFAULT '[]',
                language TEXT,
                stars INTEGER NOT NULL DEFAULT 0,
                forks INTEGER NOT NULL DEFAULT 0,
                open_issues INTEGER NOT NULL DEFAULT 0,
                license TEXT,
                pushed_at TEXT,
                PRIMARY KEY (org, name)
            );

            CREATE TABLE IF NOT EXISTS issues (
                repo TEXT NOT NULL,
                number INTEGER NOT NULL,
                title TEXT NOT NULL,
                state TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (repo, number)
            );
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn ensure_indexes(&self) -> Result<()> {
        let conn = self.lock();
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_repos_org_stars ON repos(org, stars DESC);
            CREATE INDEX IF NOT EXISTS idx_issues_repo_state ON issues(repo, state);
            "#,
        )?;
        Ok(())
    }

    async fn upsert_repo(&self, repo: &RepoRecord) -> Result<()> {
        let topics = serde_json::to_string(&repo.topics)?;
        let pushed_at = repo.pushed_at.map(|t| t.to_rfc3339());

        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO repos
                (org, name, description, topics, language, stars, forks,
                 open_issues, license, pushed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(org, name) DO UPDATE SET
                description = excluded.description,
                topics = excluded.topics,
                language = excluded.language,
                stars = excluded.stars,
                forks = excluded.forks,
                open_issues = excluded.open_issues,
                license = excluded.license,
                pushed_at = excluded.pushed_at
            "#,
            params![
                repo.org,
                repo.name,
                repo.description,
                topics,
                repo.language,
                repo.stars,
                repo.forks,
                repo.open_issues,
                repo.license,
                pushed_at,
            ],
        )?;
        Ok(())
    }

    async fn upsert_issue(&self, issue: &IssueRecord) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO issues (repo, number, title, state, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(repo, number) DO UPDATE SET
                title = excluded.title,
                state = excluded.state,
                created_at = excluded.created_at
            "#,
            params![
                issue.repo,
                issue.number,
                issue.title,
                issue.state.as_str(),
                issue.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn top_repos(&self, org: &str, metric: TopMetric, limit: u32) -> Result<Vec<RepoRecord>> {
        let order_column = match metric {
            TopMetric::Stars => "stars",
            TopMetric::Issues => "open_issues",
        };
        let sql = format!(
            "SELECT org, name, description, topics, language, stars, forks,
                    open_issues, license, pushed_at
             FROM repos WHERE org = ?1
             ORDER BY {} DESC, name ASC
             LIMIT ?2",
            order_column
        );

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![org, limit], repo_from_row)?;

        let mut repos = Vec::new();
        for row in rows {
            repos.push(row?);
        }
        Ok(repos)
    }

    async fn issue_count(&self, repo: &str) -> Result<u64> {
        let conn = self.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE repo = ?1",
            params![repo],
            |r| r.get(0),
        )?;
        Ok(count as u64)
    }
}

fn repo_from_row(row: &Row<'_>) -> rusqlite::Result<RepoRecord> {
    let topics_json: String = row.get(3)?;
    let pushed_at_text: Option<String> = row.get(9)?;

    Ok(RepoRecord {
        org: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        topics: serde_json::from_str(&topics_json).unwrap_or_default(),
        language: row.get(4)?,
        stars: row.get(5)?,
        forks: row.get(6)?,
        open_issues: row.get(7)?,
        license: row.get(8)?,
        pushed_at: pushed_at_text.and_then(parse_timestamp),
    })
}

fn parse_timestamp(text: String) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
