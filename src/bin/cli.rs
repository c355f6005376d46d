//! CLI binary for discover.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use discover::{
    Discover, DiscoverConfig, JsonFileStore, PluginRegistry, ReleaseDateChecker, TaskContext,
};
use discover_search::engines::CatalogSearcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Discover: search for items seeded by configured inputs.
#[derive(Parser)]
#[command(name = "discover", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Task name; scopes execution records.
    #[arg(short, long, default_value = "discover")]
    task: String,

    /// Execution record file (default: <config dir>/discover/<task>.json).
    #[arg(long)]
    state: Option<PathBuf>,

    /// JSON catalog searched by the `catalog` searcher.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Ignore intervals and search every candidate now.
    #[arg(long)]
    now: bool,
}

fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("discover=info,discover_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DiscoverConfig::from_file(&cli.config)?;

    let mut registry = PluginRegistry::with_builtins();
    let catalog = match &cli.catalog {
        Some(path) => CatalogSearcher::from_file(path)?,
        None => CatalogSearcher::default(),
    };
    info!(entries = catalog.len(), "catalog loaded");
    registry.register_searcher("catalog", Arc::new(catalog));

    let state_path = cli
        .state
        .unwrap_or_else(|| JsonFileStore::default_path(&cli.task));
    let store = JsonFileStore::open(state_path)?;

    let ctx = TaskContext::new(cli.task).with_run_now(cli.now);
    let mut discover = Discover::new(registry, store).with_release_checker(ReleaseDateChecker);
    let results = discover.discover(&config, &ctx)?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
