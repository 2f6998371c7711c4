mod countries;
mod render;
mod search;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use placefinder_search::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placefinder")]
#[command(about = "Find places of interest near a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for places near a location
    Search {
        /// Free-text location (e.g., "Kigali, Rwanda")
        location: String,
        /// Narrow results by cuisine (e.g., italian)
        #[arg(long)]
        cuisine: Option<String>,
        /// Sort key: name, rating or none
        #[arg(long, default_value = "none")]
        sort: SortKey,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest settlement names for partial input
    Suggest {
        /// At least three characters of a place name
        text: String,
    },
    /// List countries from the REST Countries feed
    Countries {
        /// Keep countries whose name contains this text
        #[arg(long, default_value = "")]
        filter: String,
        /// Sort key: name, population or none
        #[arg(long, default_value = "none")]
        sort: SortKey,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = placefinder_core::load_app_config()?;

    // Logs go to stderr so stdout carries only results.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            location,
            cuisine,
            sort,
            desc,
            json,
        } => search::run_search(&config, location, cuisine, sort, !desc, json).await,
        Commands::Suggest { text } => search::run_suggest(&config, &text).await,
        Commands::Countries {
            filter,
            sort,
            desc,
            json,
        } => countries::run_countries(&config, &filter, sort, !desc, json).await,
    }
}
