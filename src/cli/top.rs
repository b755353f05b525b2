//! Top repositories command

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output::{json, table};
use crate::store::{RepoRecord, SqliteStore, Store, TopMetric};

/// Display format for repositories in table view
#[derive(Tabled, Serialize)]
struct RepoDisplay {
    #[tabled(rename = "NAME")]
    name: String,

    #[tabled(rename = "STARS")]
    stars: i64,

    #[tabled(rename = "FORKS")]
    forks: i64,

    #[tabled(rename = "OPEN ISSUES")]
    open_issues: i64,

    #[tabled(rename = "LANGUAGE")]
    language: String,

    #[tabled(rename = "PUSHED AT")]
    pushed_at: String,
}

impl From<RepoRecord> for RepoDisplay {
    fn from(repo: RepoRecord) -> Self {
        Self {
            name: repo.name,
            stars: repo.stars,
            forks: repo.forks,
            open_issues: repo.open_issues,
            language: repo.language.unwrap_or_else(|| "-".to_string()),
            pushed_at: repo
                .pushed_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Run the top command
pub async fn run(
    org: &str,
    metric: &str,
    limit: u32,
    format: OutputFormat,
    config_path: Option<&str>,
) -> Result<()> {
    let metric = match metric {
        "stars" => TopMetric::Stars,
        "issues" => TopMetric::Issues,
        other => {
            log::warn!("Unknown metric {:?}, defaulting to stars", other);
            TopMetric::Stars
        }
    };

    let config = Config::load_at(config_path)?;
    let store = SqliteStore::open(&config.resolve_db_path()?)?;

    let repos = store.top_repos(org, metric, limit).await?;
    if repos.is_empty() {
        println!("No repos found for org \"{}\"", org);
        return Ok(());
    }

    let rows: Vec<RepoDisplay> = repos.into_iter().map(RepoDisplay::from).collect();

    match format {
        OutputFormat::Table => println!("{}", table::format_table(&rows)),
        OutputFormat::Json => println!("{}", json::format_json(&rows)?),
    }

    Ok(())
}
