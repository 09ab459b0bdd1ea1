//! Standing command handler

use crate::cli::{emit, load_occupations};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::territory::ratio::OccupationRatio;
use crate::territory::standing::compute_standing;
use clap::Args;
use std::path::PathBuf;

/// Standing command arguments
#[derive(Args)]
pub struct StandingArgs {
    /// Goguryeo share in percent
    #[arg(long, conflicts_with = "stores")]
    pub goguryeo: Option<f64>,

    /// Baekjae share in percent
    #[arg(long, conflicts_with = "stores")]
    pub baekjae: Option<f64>,

    /// Shinla share in percent
    #[arg(long, conflicts_with = "stores")]
    pub shinla: Option<f64>,

    /// Read the global ratio from a JSON snapshot instead of the backend API
    #[arg(long, short = 's')]
    pub stores: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Run the standing command
pub async fn run(args: StandingArgs) -> Result<()> {
    let config = Config::load()?;

    let format = args.format.clone().unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let ratio = match manual_ratio(&args) {
        Some(ratio) => ratio,
        None => load_occupations(args.stores.as_deref(), &config).await?,
    };

    let standing = compute_standing(&ratio);
    emit(&formatter.format_standing(&standing)?, args.output.as_deref())
}

/// Ratio given on the command line; unset shares count as zero
fn manual_ratio(args: &StandingArgs) -> Option<OccupationRatio> {
    if args.goguryeo.is_none() && args.baekjae.is_none() && args.shinla.is_none() {
        return None;
    }
    Some(OccupationRatio::new(
        args.goguryeo.unwrap_or(0.0),
        args.baekjae.unwrap_or(0.0),
        args.shinla.unwrap_or(0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(goguryeo: Option<f64>, baekjae: Option<f64>, shinla: Option<f64>) -> StandingArgs {
        StandingArgs {
            goguryeo,
            baekjae,
            shinla,
            stores: None,
            format: None,
            output: None,
        }
    }

    #[test]
    fn test_manual_ratio_absent() {
        assert_eq!(manual_ratio(&args(None, None, None)), None);
    }

    #[test]
    fn test_manual_ratio_partial() {
        assert_eq!(
            manual_ratio(&args(None, Some(60.0), None)),
            Some(OccupationRatio::new(0.0, 60.0, 0.0))
        );
    }
}
