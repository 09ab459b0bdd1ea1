//! Factions and territory ownership
//!
//! This module handles:
//! - Normalizing per-store occupation ratios and picking the controlling faction
//! - Turning the global ratio into a three-kingdom standing

pub mod ratio;
pub mod standing;

use serde::{Deserialize, Serialize};

/// One of the three kingdoms, or no controller at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Goguryeo,
    Baekjae,
    Shinla,
    /// Derived when every ratio is zero; never stored upstream
    Unoccupied,
}

impl Faction {
    /// The three competing factions in tie-break priority order
    pub const KINGDOMS: [Faction; 3] = [Faction::Goguryeo, Faction::Baekjae, Faction::Shinla];

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Goguryeo => "고구려",
            Self::Baekjae => "백제",
            Self::Shinla => "신라",
            Self::Unoccupied => "미점령",
        }
    }

    /// Map pin colour
    pub fn color(&self) -> &'static str {
        match self {
            Self::Goguryeo => "#C73434",
            Self::Baekjae => "#2D3EFF",
            Self::Shinla => "#FF992D",
            Self::Unoccupied => "#E5E7EB",
        }
    }

    pub fn is_occupied(&self) -> bool {
        !matches!(self, Self::Unoccupied)
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goguryeo => write!(f, "goguryeo"),
            Self::Baekjae => write!(f, "baekjae"),
            Self::Shinla => write!(f, "shinla"),
            Self::Unoccupied => write!(f, "unoccupied"),
        }
    }
}

impl std::str::FromStr for Faction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goguryeo" | "고구려" => Ok(Self::Goguryeo),
            "baekjae" | "baekje" | "백제" => Ok(Self::Baekjae),
            "shinla" | "silla" | "신라" => Ok(Self::Shinla),
            "unoccupied" | "미점령" => Ok(Self::Unoccupied),
            _ => Err(format!("Unknown faction: {}", s)),
        }
    }
}
