//! Global three-kingdom standing
//!
//! The backend supplies one pre-aggregated ratio for the whole map; this
//! module passes its percentages through and picks a leader. Nothing here
//! recomputes shares from individual stores.

use crate::territory::ratio::{leading_faction, OccupationRatio};
use crate::territory::Faction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Order the standing entries are presented in
pub const DISPLAY_ORDER: [Faction; 3] = [Faction::Shinla, Faction::Goguryeo, Faction::Baekjae];

/// One kingdom's global share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub faction: Faction,
    /// Unrounded percentage as supplied upstream
    pub percentage: f64,
}

impl StandingEntry {
    /// Percentage rounded to the nearest integer, for labels only
    pub fn rounded(&self) -> i64 {
        self.percentage.round() as i64
    }

    /// Display label such as "34%"
    pub fn label(&self) -> String {
        format!("{}%", self.rounded())
    }
}

/// Three-kingdom standing with its leader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStanding {
    pub entries: [StandingEntry; 3],
    pub leader: Faction,
}

impl GlobalStanding {
    /// Entry for one kingdom
    pub fn entry(&self, faction: Faction) -> Option<&StandingEntry> {
        self.entries.iter().find(|e| e.faction == faction)
    }

    /// The leader's entry
    pub fn leader_entry(&self) -> Option<&StandingEntry> {
        self.entry(self.leader)
    }
}

/// Build the standing for a global ratio
///
/// The leader is the largest unrounded percentage; ties go to Goguryeo, then
/// Baekjae, then Shinla. An all-zero ratio therefore reports Goguryeo as
/// leader even though there is no data behind it.
pub fn compute_standing(ratio: &OccupationRatio) -> GlobalStanding {
    let total = ratio.total();
    if total != 0.0 && (total - 100.0).abs() > 1.0 {
        debug!(total, "Global ratio does not sum to 100");
    }

    let entries = DISPLAY_ORDER.map(|faction| StandingEntry {
        faction,
        percentage: ratio.share(faction),
    });

    GlobalStanding {
        entries,
        leader: leading_faction(ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_lead() {
        let standing = compute_standing(&OccupationRatio::new(34.0, 33.0, 33.0));
        assert_eq!(standing.leader, Faction::Goguryeo);
    }

    #[test]
    fn test_all_zero_reports_goguryeo() {
        let standing = compute_standing(&OccupationRatio::new(0.0, 0.0, 0.0));
        assert_eq!(standing.leader, Faction::Goguryeo);
    }

    #[test]
    fn test_ties_follow_priority_order() {
        let standing = compute_standing(&OccupationRatio::new(20.0, 40.0, 40.0));
        assert_eq!(standing.leader, Faction::Baekjae);
    }

    #[test]
    fn test_percentages_pass_through_in_display_order() {
        let standing = compute_standing(&OccupationRatio::new(34.4, 33.3, 32.3));
        let factions: Vec<Faction> = standing.entries.iter().map(|e| e.faction).collect();

        assert_eq!(factions, DISPLAY_ORDER.to_vec());
        assert_eq!(standing.entry(Faction::Goguryeo).unwrap().percentage, 34.4);
        assert_eq!(standing.entry(Faction::Shinla).unwrap().percentage, 32.3);
        assert!(standing.entry(Faction::Unoccupied).is_none());
    }

    #[test]
    fn test_rounding_does_not_affect_leader() {
        // 33.4 and 33.2 both label as "33%" but the leader is still decided
        // on the raw values.
        let standing = compute_standing(&OccupationRatio::new(33.2, 33.4, 33.3));
        assert_eq!(standing.leader, Faction::Baekjae);
        assert_eq!(standing.entry(Faction::Goguryeo).unwrap().label(), "33%");
        assert_eq!(standing.entry(Faction::Baekjae).unwrap().label(), "33%");
    }

    #[test]
    fn test_label_rounds_to_nearest() {
        let entry = StandingEntry {
            faction: Faction::Shinla,
            percentage: 33.5,
        };
        assert_eq!(entry.label(), "34%");
        assert_eq!(entry.percentage, 33.5);
    }

    #[test]
    fn test_leader_entry() {
        let standing = compute_standing(&OccupationRatio::new(10.0, 20.0, 70.0));
        let leader = standing.leader_entry().unwrap();
        assert_eq!(leader.faction, Faction::Shinla);
        assert_eq!(leader.label(), "70%");
    }
}
