//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod faction;
pub mod geocode;
pub mod nearby;
pub mod serve;
pub mod standing;

use crate::config::Config;
use crate::error::Result;
use crate::format::available_formats;
use crate::store::source::{ApiClient, JsonFileSource, StoreSource};
use crate::store::Store;
use crate::territory::ratio::OccupationRatio;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Three-kingdoms store map: territory and nearest stores
#[derive(Parser)]
#[command(name = "samguk-map")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the stores nearest to a location
    Nearby(nearby::NearbyArgs),

    /// Show the global three-kingdom standing
    Standing(standing::StandingArgs),

    /// Resolve the controlling faction of an occupation ratio
    Faction(faction::FactionArgs),

    /// Geocode an address
    Geocode(geocode::GeocodeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_tracing(default_filter);

    match cli.command {
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Standing(args) => standing::run(args).await,
        Commands::Faction(args) => faction::run(args),
        Commands::Geocode(args) => geocode::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args).await,
    }
}

/// Install the log subscriber; `RUST_LOG` overrides `default_filter`
fn init_tracing(default_filter: &str) {
    // a second call (e.g. from tests) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Stores from a snapshot file, or from the backend API when no file is given
async fn load_stores(snapshot: Option<&Path>, config: &Config) -> Result<Vec<Store>> {
    match snapshot {
        Some(path) => JsonFileSource::new(path).fetch_stores().await,
        None => ApiClient::from_config(config)?.fetch_stores().await,
    }
}

/// Global ratio from a snapshot file, or from the backend API
async fn load_occupations(snapshot: Option<&Path>, config: &Config) -> Result<OccupationRatio> {
    match snapshot {
        Some(path) => JsonFileSource::new(path).fetch_occupations().await,
        None => ApiClient::from_config(config)?.fetch_occupations().await,
    }
}

/// Print output, or write it to `path`
fn emit(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        eprintln!("Output written to {}", path.display());
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
