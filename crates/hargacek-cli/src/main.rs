mod search;
mod sites;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hargacek")]
#[command(about = "Compare marketplace prices for a search keyword")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured source and print listings, cheapest first
    Search {
        /// Search keyword, e.g. "keyboard gaming"
        keyword: String,
        /// Print the product list as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the configured sources
    Sites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = hargacek_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            keyword,
            json,
            limit,
        } => search::run_search(&config, &keyword, json, limit).await,
        Commands::Sites => sites::run_sites(&config),
    }
}
