//! Organization fetch command

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;

use crate::cache::ResponseCache;
use crate::checkpoint::CheckpointStore;
use crate::client::{self, GithubClient};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::ingest::Ingestor;
use crate::store::{SqliteStore, Store};
use crate::walker::PageWalker;

/// Run the fetch command for one organization
pub async fn run(
    org: &str,
    since: Option<&str>,
    config_path: Option<&str>,
    no_cache: bool,
) -> Result<()> {
    let config = Config::load_at(config_path)?;
    let since = since.map(parse_since).transpose()?;

    let token = config.resolve_token();
    if token.is_none() {
        log::warn!("No GitHub token configured, using unauthenticated rate limits");
    }

    let transport = Arc::new(GithubClient::new(
        client::api_base_url(),
        token,
        config.preferences.max_attempts,
    )?);
    let cache = Arc::new(ResponseCache::new(
        config.resolve_cache_dir(no_cache),
        Duration::from_secs(config.preferences.cache_ttl_secs),
    ));
    let checkpoints = Arc::new(CheckpointStore::open(&config.resolve_checkpoint_path()?)?);
    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&config.resolve_db_path()?)?);

    let walker = PageWalker::new(transport, cache, checkpoints, config.preferences.page_size);
    spawn_cancel_handler(walker.cancel_flag());

    let ingestor = Ingestor::new(walker, store, config.preferences.issues_per_repo);
    ingestor.run(org, since).await?;

    println!("{} Fetch completed for org: {}", "✔".green(), org);
    Ok(())
}

/// Parse a `--since` date as midnight UTC of that day
fn parse_since(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ConfigError::Invalid(format!("--since must be YYYY-MM-DD, got {:?}", raw))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ConfigError::Invalid(format!("invalid date {:?}", raw)))?;
    Ok(midnight.and_utc())
}

/// First Ctrl+C requests a clean stop between pages; the walk ends with the
/// last completed checkpoint intact.
fn spawn_cancel_handler(flag: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nShutdown requested, stopping after the current page...");
            flag.store(true, Ordering::Release);
        }
    });
}
