//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::pipeline::PassResult;
use crate::territory::standing::GlobalStanding;

/// JSON formatter - outputs values as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }

    fn format_pass(&self, result: &PassResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn format_standing(&self, standing: &GlobalStanding) -> Result<String> {
        Ok(serde_json::to_string_pretty(standing)?)
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

    #[test]
    fn test_json_pass() {
        let mut nearest = ResolvedStore::new(
            store("7", "서울 중구 세종대로 110", Some(OccupationRatio::new(10.0, 60.0, 30.0))),
            Coordinates::new(37.5663, 126.9779),
        );
        nearest.distance_km = Some(0.03);
        let result = PassResult {
            origin: Coordinates::new(37.5665, 126.978),
            resolved: vec![nearest.clone()],
            nearest: vec![nearest],
            skipped: vec!["8".to_string()],
            completed_at: Utc::now(),
        };

        let output = JsonFormatter.format_pass(&result).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["nearest"][0]["store_id"], "7");
        assert_eq!(parsed["nearest"][0]["faction"], "baekjae");
        assert_eq!(parsed["skipped"][0], "8");
        assert!(parsed.get("completed_at").is_some());
    }

    #[test]
    fn test_json_standing() {
        let standing = compute_standing(&OccupationRatio::new(34.0, 33.0, 33.0));
        let output = JsonFormatter.format_standing(&standing).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["leader"], "goguryeo");
        assert_eq!(parsed["entries"][0]["faction"], "shinla");
        assert_eq!(parsed["entries"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
