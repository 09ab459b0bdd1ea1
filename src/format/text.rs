//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::pipeline::PassResult;
use crate::territory::standing::GlobalStanding;

/// Text formatter - outputs a terminal-friendly summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_pass(&self, result: &PassResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "Origin: ({:.6}, {:.6})\n",
            result.origin.latitude, result.origin.longitude
        ));
        output.push_str(&format!(
            "Resolved: {} stores, skipped {}\n\n",
            result.resolved.len(),
            result.skipped.len()
        ));

        if result.nearest.is_empty() {
            output.push_str("No stores nearby\n");
        } else {
            output.push_str("Nearby:\n");
            for (i, store) in result.nearest.iter().enumerate() {
                let distance = store
                    .distance_km
                    .map(|d| format!("{:.2} km", d))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "  {}. {} [{}] {} ({})\n",
                    i + 1,
                    store.store.name,
                    store.store.store_type,
                    distance,
                    store.faction.label()
                ));
                output.push_str(&format!("     {}\n", store.store.address));
            }
        }

        if !result.skipped.is_empty() {
            output.push_str(&format!("\nSkipped: {}\n", result.skipped.join(", ")));
        }

        Ok(output)
    }

    fn format_standing(&self, standing: &GlobalStanding) -> Result<String> {
        let mut output = String::from("Standing:\n");

        for entry in &standing.entries {
            let marker = if entry.faction == standing.leader { "*" } else { " " };
            output.push_str(&format!(
                " {} {:<4} {:>4}\n",
                marker,
                entry.faction.label(),
                entry.label()
            ));
        }
        output.push_str(&format!("\nLeader: {}\n", standing.leader.label()));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::store::tests::store;
    use crate::store::ResolvedStore;
    use crate::territory::ratio::OccupationRatio;
    use crate::territory::standing::compute_standing;
    use chrono::Utc;

    fn pass(nearest: Vec<ResolvedStore>, skipped: Vec<String>) -> PassResult {
        PassResult {
            origin: Coordinates::new(37.5665, 126.978),
            resolved: nearest.clone(),
            nearest,
            skipped,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_text_pass() {
        let mut near = ResolvedStore::new(
            store("1", "서울 중구 세종대로 110", Some(OccupationRatio::new(50.0, 30.0, 20.0))),
            Coordinates::new(37.58, 126.978),
        );
        near.distance_km = Some(1.5);

        let output = TextFormatter
            .format_pass(&pass(vec![near], vec!["2".to_string()]))
            .unwrap();

        assert!(output.contains("Origin: (37.566500, 126.978000)"));
        assert!(output.contains("1. Store 1 [food] 1.50 km (고구려)"));
        assert!(output.contains("서울 중구 세종대로 110"));
        assert!(output.contains("Skipped: 2"));
    }

    #[test]
    fn test_text_pass_empty() {
        let output = TextFormatter.format_pass(&pass(Vec::new(), Vec::new())).unwrap();
        assert!(output.contains("No stores nearby"));
        assert!(!output.contains("Skipped"));
    }

    #[test]
    fn test_text_standing() {
        let standing = compute_standing(&OccupationRatio::new(20.0, 30.0, 50.0));
        let output = TextFormatter.format_standing(&standing).unwrap();

        assert!(output.contains("50%"));
        assert!(output.contains("Leader: 신라"));
        // shinla is listed first
        assert!(output.find("신라").unwrap() < output.find("고구려").unwrap());
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
