//! CLI entry and dispatch.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dboard_core::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dboard")]
#[command(version)]
#[command(about = "Browse and search a course discussion board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the topic tree of a category map
    Topics {
        /// Category map JSON file
        #[arg(value_name = "MAP")]
        map: PathBuf,

        /// Only show topics matching every word of TEXT (plus their context)
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,

        /// Print the comma-joined leaf ids under a topic instead of the tree
        #[arg(long, value_name = "ID", conflicts_with = "filter")]
        ids_under: Option<String>,
    },

    /// Search threads (and matching usernames) on the configured server
    Search {
        /// Category map JSON file
        #[arg(value_name = "MAP")]
        map: PathBuf,

        /// Search text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Scope the search to a topic and its sub-topics
        #[arg(long, value_name = "ID")]
        topic: Option<String>,

        /// Course id (overrides config)
        #[arg(long, value_name = "COURSE_ID", env = "DBOARD_COURSE_ID")]
        course: Option<String>,
    },

    /// Parse a location fragment and print its canonical form
    Route {
        #[arg(value_name = "FRAGMENT", allow_hyphen_values = true)]
        fragment: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;
    init_logging(&config.log_filter);

    match cli.command {
        Commands::Topics {
            map,
            filter,
            ids_under,
        } => commands::topics::run(&map, filter.as_deref(), ids_under.as_deref()),
        Commands::Search {
            map,
            text,
            topic,
            course,
        } => {
            commands::search::run(commands::search::SearchOptions {
                map: &map,
                text: &text,
                topic: topic.as_deref(),
                course: course.as_deref(),
                config: &config,
            })
            .await
        }
        Commands::Route { fragment } => commands::route::run(&fragment),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
        },
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the configured filter.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
