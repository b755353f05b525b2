//! Store initialization command

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::store::{SqliteStore, Store};

/// Open the store, create schema and query indexes
pub async fn run(config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    let db_path = config.resolve_db_path()?;

    let store = SqliteStore::open(&db_path)?;
    store.ensure_indexes().await?;

    println!("{} Store ready at {}", "✔".green(), db_path.display());
    Ok(())
}
