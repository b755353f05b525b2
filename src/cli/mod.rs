//! CLI command definitions and handlers

use clap::{Parser, Subcommand, ValueEnum};

pub mod cache;
pub mod fetch;
pub mod init;
pub mod top;

/// Output format for commands that render data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// orgpulse - ingest GitHub organization repos and issues into a local store
#[derive(Parser, Debug)]
#[command(name = "orgpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "ORGPULSE_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "ORGPULSE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ORGPULSE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the response cache, always fetch fresh data
    #[arg(long, global = true, env = "ORGPULSE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store schema and indexes
    Init,

    /// Fetch public repos + issues for an organization
    Fetch {
        /// Organization name
        org: String,

        /// Only ingest repos pushed since this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Show top repos for an organization, from already-stored data
    Top {
        /// Organization name
        #[arg(long)]
        org: String,

        /// Ranking metric: stars or issues
        #[arg(long, default_value = "stars")]
        metric: String,

        /// Number of repos to show
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Inspect or reset the response cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache entry counts and size
    Stats,

    /// Remove all cached responses
    Clear,
}
