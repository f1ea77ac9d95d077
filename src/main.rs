use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadmap::cli;
use roadmap::store::{FeatureStore, JsonFileStorage};

#[derive(Parser)]
#[command(name = "rdmp")]
#[command(about = "Feature roadmap tracker with an impact/effort prioritization matrix")]
struct Cli {
    /// Store features in this file instead of the platform data directory
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a feature to the roadmap
    Add(cli::AddArgs),
    /// List features matching the given filters
    List(cli::ListArgs),
    /// Show one feature in full, with its matrix interpretation
    Show(cli::ShowArgs),
    /// Edit fields of an existing feature
    Edit(cli::EditArgs),
    /// Delete a feature
    Delete(cli::DeleteArgs),
    /// Show summary counts
    Stats(cli::StatsArgs),
    /// Render the impact/effort board
    Board,
}

/// Initialize tracing to stderr so stdout stays clean for tables and JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "roadmap=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the store over the chosen slot and load it.
fn open_store(file: Option<PathBuf>) -> anyhow::Result<FeatureStore> {
    let storage = match file {
        Some(path) => JsonFileStorage::new(path),
        None => JsonFileStorage::new(JsonFileStorage::default_path()?),
    };

    let mut store = FeatureStore::new(Box::new(storage.clone()));
    store
        .load()
        .with_context(|| format!("Failed to load features from {}", storage.path().display()))?;
    Ok(store)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut store = open_store(cli.file)?;

    match cli.command {
        Commands::Add(args) => cli::cmd_add(&mut store, args),
        Commands::List(args) => cli::cmd_list(&mut store, args),
        Commands::Show(args) => cli::cmd_show(&store, args),
        Commands::Edit(args) => cli::cmd_edit(&mut store, args),
        Commands::Delete(args) => cli::cmd_delete(&mut store, args),
        Commands::Stats(args) => cli::cmd_stats(&store, args),
        Commands::Board => cli::cmd_board(&store),
    }
}
