//! orgpulse CLI - fetch GitHub organization data into a local store

use clap::Parser;
use colored::Colorize;

use orgpulse::cli::{self, CacheCommands, Cli, Commands};
use orgpulse::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {}", "Error:".red(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()).await,
        Commands::Fetch { org, since } => {
            cli::fetch::run(&org, since.as_deref(), cli.config.as_deref(), cli.no_cache).await
        }
        Commands::Top { org, metric, limit } => {
            cli::top::run(&org, &metric, limit, cli.format, cli.config.as_deref()).await
        }
        Commands::Cache { command } => match command {
            CacheCommands::Stats => cli::cache::stats(cli.config.as_deref()),
            CacheCommands::Clear => cli::cache::clear(cli.config.as_deref()),
        },
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
