mod output;

use anyhow::Context;
use basil_identifier::{ConfigLoader, IdentifierTypeAnalyser};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "basil", version, about = "Basil identifier classifier")]
struct Args {
    /// YAML config file (defaults to ~/.basil/config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the category of each identifier. Reads stdin lines when none are given.
    Classify {
        identifiers: Vec<String>,
        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Print every predicate result for each identifier
    Check {
        identifiers: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigLoader::load_default()
            .await
            .context("Failed to load default config")?,
    };
    debug!(?config, "Loaded config");

    let analyser = IdentifierTypeAnalyser::from_config(&config)?;

    let (identifiers, json, check) = match args.command {
        Command::Classify { identifiers, json } => (identifiers, json, false),
        Command::Check { identifiers, json } => (identifiers, json, true),
    };
    let render = |identifier: &str| {
        if check {
            output::predicates(&analyser, identifier, json)
        } else {
            output::classification(&analyser, identifier, json)
        }
    };

    if identifiers.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            println!("{}", render(&line));
        }
    } else {
        for identifier in &identifiers {
            println!("{}", render(identifier));
        }
    }

    Ok(())
}
