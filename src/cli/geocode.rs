//! Geocode command handler

use crate::config::Config;
use crate::error::Result;
use crate::geo::get_resolver;
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Address to look up
    pub address: String,
}

/// Run the geocode command
///
/// Exits with status 1 when no provider can place the address.
pub async fn run(args: GeocodeArgs) -> Result<()> {
    let config = Config::load()?;
    let resolver = get_resolver(&config)?;

    match resolver.resolve(&args.address).await {
        Some(coords) => {
            println!("{:.6}, {:.6}", coords.latitude, coords.longitude);
            Ok(())
        }
        None => {
            eprintln!("Error: Could not geocode '{}'", args.address);
            std::process::exit(1);
        }
    }
}
