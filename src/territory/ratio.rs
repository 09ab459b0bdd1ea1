//! Occupation ratios and controlling-faction resolution
//!
//! The backend emits per-store ratios under two key conventions for the same
//! value (`goguryeo_ratio_ratio` and `goguryeo_ratio`). [`RawRatioRecord`]
//! accepts both and [`RawRatioRecord::normalize`] collapses them once, so
//! nothing downstream ever sees the inconsistency.

use crate::territory::Faction;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Three-way percentage split between the kingdoms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OccupationRatio {
    #[serde(rename = "goguryeo_ratio", alias = "goguryeo", default)]
    pub goguryeo: f64,
    #[serde(rename = "baekjae_ratio", alias = "baekjae", default)]
    pub baekjae: f64,
    #[serde(rename = "shinla_ratio", alias = "shinla", default)]
    pub shinla: f64,
}

impl OccupationRatio {
    pub fn new(goguryeo: f64, baekjae: f64, shinla: f64) -> Self {
        Self {
            goguryeo,
            baekjae,
            shinla,
        }
    }

    /// Share held by one faction (0 for `Unoccupied`)
    pub fn share(&self, faction: Faction) -> f64 {
        match faction {
            Faction::Goguryeo => self.goguryeo,
            Faction::Baekjae => self.baekjae,
            Faction::Shinla => self.shinla,
            Faction::Unoccupied => 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.goguryeo + self.baekjae + self.shinla
    }

    /// True only when all three shares are exactly zero
    pub fn is_unoccupied(&self) -> bool {
        self.goguryeo == 0.0 && self.baekjae == 0.0 && self.shinla == 0.0
    }

    /// The faction holding the largest share
    ///
    /// All-zero ratios are `Unoccupied`. Ties go to the first of
    /// Goguryeo, Baekjae, Shinla that holds the maximum. Negative values are
    /// not rejected; they simply take part in the comparison.
    pub fn controlling_faction(&self) -> Faction {
        if self.is_unoccupied() {
            return Faction::Unoccupied;
        }

        leading_faction(self)
    }
}

/// Highest share among the three kingdoms with fixed-priority tie-break
///
/// Unlike [`OccupationRatio::controlling_faction`] this never returns
/// `Unoccupied`; an all-zero ratio yields Goguryeo.
pub(crate) fn leading_faction(ratio: &OccupationRatio) -> Faction {
    let max = ratio.goguryeo.max(ratio.baekjae).max(ratio.shinla);

    if max == ratio.goguryeo {
        Faction::Goguryeo
    } else if max == ratio.baekjae {
        Faction::Baekjae
    } else {
        Faction::Shinla
    }
}

/// A per-store ratio exactly as received from the backend
///
/// `null` and missing keys are both treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRatioRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goguryeo_ratio_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goguryeo_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baekjae_ratio_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baekjae_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shinla_ratio_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shinla_ratio: Option<f64>,
}

impl RawRatioRecord {
    /// The (primary, alternate) values for one kingdom
    fn keys(&self, faction: Faction) -> (Option<f64>, Option<f64>) {
        match faction {
            Faction::Goguryeo => (self.goguryeo_ratio_ratio, self.goguryeo_ratio),
            Faction::Baekjae => (self.baekjae_ratio_ratio, self.baekjae_ratio),
            Faction::Shinla => (self.shinla_ratio_ratio, self.shinla_ratio),
            Faction::Unoccupied => (None, None),
        }
    }

    /// Kingdoms for which both key conventions are present with different values
    pub fn conflicting_factions(&self) -> Vec<Faction> {
        Faction::KINGDOMS
            .into_iter()
            .filter(|faction| matches!(self.keys(*faction), (Some(a), Some(b)) if a != b))
            .collect()
    }

    /// Collapse both key conventions into one ratio
    ///
    /// Primary (`_ratio_ratio`) wins over alternate (`_ratio`); a kingdom with
    /// neither key counts as 0.
    pub fn normalize(&self) -> OccupationRatio {
        for faction in self.conflicting_factions() {
            let (primary, alternate) = self.keys(faction);
            warn!(
                %faction,
                primary = ?primary,
                alternate = ?alternate,
                "Ratio keys disagree, using {}_ratio_ratio",
                faction
            );
        }

        let pick = |faction| {
            let (primary, alternate) = self.keys(faction);
            primary.or(alternate).unwrap_or(0.0)
        };

        OccupationRatio {
            goguryeo: pick(Faction::Goguryeo),
            baekjae: pick(Faction::Baekjae),
            shinla: pick(Faction::Shinla),
        }
    }
}

impl From<OccupationRatio> for RawRatioRecord {
    fn from(ratio: OccupationRatio) -> Self {
        Self {
            goguryeo_ratio: Some(ratio.goguryeo),
            baekjae_ratio: Some(ratio.baekjae),
            shinla_ratio: Some(ratio.shinla),
            ..Self::default()
        }
    }
}

/// Resolve the controlling faction of a raw per-store record
pub fn resolve_faction(raw: &RawRatioRecord) -> Faction {
    raw.normalize().controlling_faction()
}
