use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use plex_query_config::{mask_secret, Config};
use plex_query_sources::PlexServer;
use std::path::PathBuf;
use tracing::debug;

mod logging;
mod output;
mod report;

#[derive(Parser)]
#[command(name = "plex-query")]
#[command(about = "Print unwatched movies, connected clients, search results and library items from a Plex server")]
#[command(
    long_about = "Connects to the Plex Media Server named by BASE_URL using TOKEN (from the environment, a .env file, or the config file) and prints four reports: unwatched movies, connected clients, search results for 'transformers', and every item in the 'Movies' section with its web URL."
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging on stderr (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output);
    debug!("Output format: {:?}", output.format());

    // Configuration is complete before any network call
    let config = Config::load().wrap_err("Invalid configuration")?;
    debug!(
        "Using Plex server {} with token {}",
        config.base_url,
        mask_secret(&config.token)
    );

    let server = PlexServer::connect(&config)
        .await
        .wrap_err_with(|| format!("Failed to connect to Plex server at {}", config.base_url))?;

    report::run(&server, &output).await
}
