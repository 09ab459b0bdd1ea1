//! Faction command handler
//!
//! Resolves a single store's controller from its ratio.

use crate::error::Result;
use crate::territory::ratio::{resolve_faction, OccupationRatio, RawRatioRecord};
use clap::Args;

/// Faction command arguments
#[derive(Args)]
pub struct FactionArgs {
    /// Goguryeo share
    #[arg(long, conflicts_with = "json")]
    pub goguryeo: Option<f64>,

    /// Baekjae share
    #[arg(long, conflicts_with = "json")]
    pub baekjae: Option<f64>,

    /// Shinla share
    #[arg(long, conflicts_with = "json")]
    pub shinla: Option<f64>,

    /// Raw ratio record, e.g. '{"goguryeo_ratio_ratio": 40, "baekjae_ratio_ratio": 60}'
    #[arg(long)]
    pub json: Option<String>,
}

/// Run the faction command
///
/// Key disagreements in a raw record are reported by the resolver's log
/// output, not here.
pub fn run(args: FactionArgs) -> Result<()> {
    let raw = raw_record(&args)?;
    println!("{}", describe(&raw));
    Ok(())
}

/// One-line summary: label, name and pin colour
fn describe(raw: &RawRatioRecord) -> String {
    let faction = resolve_faction(raw);
    format!("{} ({}) {}", faction.label(), faction, faction.color())
}

fn raw_record(args: &FactionArgs) -> Result<RawRatioRecord> {
    if let Some(json) = &args.json {
        return Ok(serde_json::from_str(json)?);
    }
    Ok(OccupationRatio::new(
        args.goguryeo.unwrap_or(0.0),
        args.baekjae.unwrap_or(0.0),
        args.shinla.unwrap_or(0.0),
    )
    .into())
}
