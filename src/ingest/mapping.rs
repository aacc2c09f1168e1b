//! Field mapping configuration for scraped pick payloads.

use serde::{Deserialize, Serialize};

/// Copies the value at a dotted `source` path to a flat `target` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Dotted path inside each record (e.g. `node.selection.odds`).
    pub source: String,
    /// Key in the flattened pick record (e.g. `selection.odds`).
    pub target: String,
}

impl FieldRule {
    /// Create a rule.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Describes where pick records live in a payload and which fields to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Dotted path to the array of records.
    pub records_path: String,
    /// Fields to copy, in output order.
    pub fields: Vec<FieldRule>,
    /// Target key holding the result status.
    pub status_field: String,
    /// Target key holding the unit size.
    pub unit_field: String,
    /// Target key holding the signed odds.
    pub odds_field: String,
    /// Target key holding the RFC 3339 game start time.
    pub scheduled_time_field: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        let fields = [
            ("node.resultStatus", "resultStatus"),
            ("node.unit", "unit"),
            ("node.game.abbrev", "game.abbrev"),
            ("node.game.scheduledTime", "game.scheduledTime"),
            ("node.game.homeTeamScore", "game.homeTeamScore"),
            ("node.game.awayTeamScore", "game.awayTeamScore"),
            ("node.game.league.abbrev", "game.league.abbrev"),
            ("node.selection.label", "selection.label"),
            ("node.selection.marketType", "selection.marketType"),
            ("node.selection.odds", "selection.odds"),
            ("node.selection.unit", "selection.unit"),
        ]
        .into_iter()
        .map(|(source, target)| FieldRule::new(source, target))
        .collect();

        Self {
            records_path: "props.pageProps.expertPicksContainerProps.pastData.expertPicks.edges"
                .to_string(),
            fields,
            status_field: "resultStatus".to_string(),
            unit_field: "unit".to_string(),
            odds_field: "selection.odds".to_string(),
            scheduled_time_field: "game.scheduledTime".to_string(),
        }
    }
}

impl FieldMapping {
    /// Load a mapping from JSON. Omitted keys fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Target keys every record must carry to be settled.
    pub fn required_fields(&self) -> [&str; 3] {
        [&self.status_field, &self.unit_field, &self.odds_field]
    }
}
