//! Response cache management commands

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::config::Config;
use crate::error::Result;

/// Show cache entry counts and size
pub fn stats(config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    let Some(dir) = config.cache_dir.as_deref() else {
        println!("Response cache is disabled (no cache_dir configured)");
        return Ok(());
    };

    let storage = CacheStorage::open_at(dir)?;
    let stats = storage.stats()?;

    println!("Cache directory: {}", dir.display());
    println!("Total entries:   {}", stats.total_entries);
    println!("Valid entries:   {}", stats.valid_entries);
    println!("Expired entries: {}", stats.expired_entries);
    println!("Total size:      {} bytes", stats.total_size_bytes);
    Ok(())
}

/// Remove all cached responses
pub fn clear(config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    let Some(dir) = config.cache_dir.as_deref() else {
        println!("Response cache is disabled (no cache_dir configured)");
        return Ok(());
    };

    let storage = CacheStorage::open_at(dir)?;
    let cleared = storage.clear_all()?;

    println!(
        "{} Removed {} cached responses",
        "✔".green(),
        cleared.entries_removed
    );
    Ok(())
}
