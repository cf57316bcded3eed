//! `addrmatch` command-line interface.
//!
//! Scores name pairs, picks best matches from a candidate file and resolves
//! conversation extracts against a catalog. Results are printed as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use addrmatch::{
    AddrMatchConfig, Candidate, ConversationExtract, LoggingConfig, StaticCatalog,
    cached_resolver, find_best_match_with, resolve_conversation,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "addrmatch")]
#[command(about = "Fuzzy matching for Vietnamese address and order-source names")]
/// Top-level CLI options.
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive; overrides `logging.level` from the config
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    /// Subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
/// Supported `addrmatch` subcommands.
enum Commands {
    /// Similarity score between two names
    Score {
        a: String,
        b: String,

        /// Include the component scores
        #[arg(long)]
        explain: bool,
    },

    /// Best candidate for a query from a JSON list of {id, name}
    Best {
        /// JSON file holding the candidate array
        #[arg(long)]
        candidates: PathBuf,

        query: String,

        /// Acceptance threshold (exclusive); defaults to the configured one
        #[arg(long)]
        threshold: Option<f64>,

        /// Also list the top N scored candidates
        #[arg(long)]
        top: Option<usize>,
    },

    /// Resolve a conversation extract against a catalog
    Resolve {
        /// JSON catalog with cities, districts, wards and order sources
        #[arg(long)]
        catalog: PathBuf,

        /// JSON conversation extract
        #[arg(long)]
        extract: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AddrMatchConfig> {
    match path {
        Some(path) => AddrMatchConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AddrMatchConfig::default()),
    }
}

fn init_tracing(logging: &LoggingConfig, override_level: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(override_level.unwrap_or(&logging.level))
        .context("invalid log filter")?;
    // stdout carries the JSON result, so logs go to stderr.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging, cli.log_level.as_deref())?;

    let matcher = config.build_matcher()?;

    let output = match cli.command {
        Commands::Score { a, b, explain } => {
            let breakdown = matcher.scorer().breakdown(&a, &b);
            if explain {
                json!({ "a": a, "b": b, "breakdown": breakdown })
            } else {
                json!({ "a": a, "b": b, "score": breakdown.score })
            }
        }
        Commands::Best {
            candidates,
            query,
            threshold,
            top,
        } => {
            let candidates: Vec<Candidate> = read_json(&candidates)?;
            let threshold = threshold.unwrap_or(matcher.config().best_match_threshold);
            if !(0.0..=1.0).contains(&threshold) {
                anyhow::bail!("threshold must be between 0.0 and 1.0, got {threshold}");
            }
            let best = find_best_match_with(matcher.scorer(), &candidates, &query, threshold);
            match top {
                Some(limit) => json!({
                    "query": query,
                    "best": best,
                    "ranked": matcher.rank(&candidates, &query, limit),
                }),
                None => json!({ "query": query, "best": best }),
            }
        }
        Commands::Resolve { catalog, extract } => {
            let catalog = StaticCatalog::from_file(&catalog)?;
            let extract: ConversationExtract = read_json(&extract)?;
            let resolver = cached_resolver(&config, catalog)?;
            let resolution =
                resolve_conversation(&resolver, resolver.source(), &extract).await?;
            serde_json::to_value(resolution)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
