//! Nearby command handler
//!
//! Resolves store addresses and lists the ones closest to an origin.

use crate::cli::{emit, list_formats, load_stores};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::geo::{get_ip_locator, get_resolver, Coordinates, DefaultResolver};
use crate::pipeline::ResolutionPass;
use clap::Args;
use std::path::PathBuf;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,

    /// Address to use as origin (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng", "here"])]
    pub location: Option<String>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng", "location"])]
    pub here: bool,

    /// Read stores from a JSON snapshot instead of the backend API
    #[arg(long, short = 's')]
    pub stores: Option<PathBuf>,

    /// Number of stores to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let resolver = get_resolver(&config)?;

    let origin = resolve_origin(&args, &resolver).await?;
    origin.validate()?;

    let limit = args.limit.unwrap_or(config.ranking.limit);
    let format = args.format.unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let stores = load_stores(args.stores.as_deref(), &config).await?;
    if stores.is_empty() {
        eprintln!("No stores to rank");
    }

    let result = ResolutionPass::new(origin, stores)
        .with_limit(limit)
        .run(&resolver)
        .await;

    emit(&formatter.format_pass(&result)?, args.output.as_deref())
}

/// Work out the origin from the location flags
async fn resolve_origin(args: &NearbyArgs, resolver: &DefaultResolver) -> Result<Coordinates> {
    if args.here {
        let origin = get_ip_locator().locate().await?;
        eprintln!("Using IP location: {}", origin.place);
        return Ok(origin.coordinates);
    }

    if let Some(address) = &args.location {
        return match resolver.resolve(address).await {
            Some(coords) => {
                eprintln!(
                    "Geocoded to: ({:.6}, {:.6})",
                    coords.latitude, coords.longitude
                );
                Ok(coords)
            }
            None => Err(Error::Geocoding(format!("Could not geocode '{}'", address))),
        };
    }

    match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
        _ => Err(Error::InvalidCoordinates(
            "No location specified. Use --lat/--lng, --location, or --here".to_string(),
        )),
    }
}
