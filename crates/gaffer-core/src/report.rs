// Tactical report returned by the analysis service.
//
// Only the identifiers and the formation string are required on the wire;
// everything else falls back to a neutral default so a partial report can
// still be rendered.

use serde::{Deserialize, Serialize};

use crate::position::{BroadPosition, SpecificPosition};
use crate::request::DataTier;

/// A player placed in the starting XI or on the bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub name: String,
    pub position: BroadPosition,
    pub specific_position: SpecificPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_position: Option<SpecificPosition>,
    #[serde(default)]
    pub fitness_score: f64,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Broad role of the slot the engine picked this player for, when it
    /// differs from the player's own role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_broad: Option<BroadPosition>,
}

fn default_true() -> bool {
    true
}

impl PlayerSlot {
    /// Last whitespace-separated token of the name, or "?" when blank.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalReport {
    pub team_name: String,
    pub opponent_name: String,
    #[serde(default)]
    pub tier_used: DataTier,
    pub recommended_formation: String,
    #[serde(default)]
    pub press_intensity: String,
    #[serde(default)]
    pub defensive_line: String,
    #[serde(default)]
    pub tactical_focus: String,
    #[serde(default)]
    pub match_risk_level: String,
    #[serde(default)]
    pub rotation_suggestions: Vec<String>,
    #[serde(default)]
    pub win_probability: Option<f64>,
    #[serde(default)]
    pub draw_probability: Option<f64>,
    #[serde(default)]
    pub loss_probability: Option<f64>,
    #[serde(default)]
    pub offensive_strength_index: Option<f64>,
    #[serde(default)]
    pub defensive_vulnerability_index: Option<f64>,
    #[serde(default)]
    pub fatigue_risk_score: Option<f64>,
    #[serde(default)]
    pub tactical_stability_score: Option<f64>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub starting_xi: Vec<PlayerSlot>,
    #[serde(default)]
    pub bench: Vec<PlayerSlot>,
}

impl TacticalReport {
    /// The four numeric indices with their display labels, in panel order.
    pub fn indices(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("Offensive Strength", self.offensive_strength_index),
            ("Defensive Vulnerability", self.defensive_vulnerability_index),
            ("Fatigue Risk", self.fatigue_risk_score),
            ("Tactical Stability", self.tactical_stability_score),
        ]
    }

    /// Names that appear in both the starting XI and the bench.
    pub fn overlapping_names(&self) -> Vec<&str> {
        self.bench
            .iter()
            .filter(|b| self.starting_xi.iter().any(|s| s.name == b.name))
            .map(|b| b.name.as_str())
            .collect()
    }
}

/// Three-step vocabulary used by press intensity and match risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Low" => Some(Level::Low),
            "Medium" => Some(Level::Medium),
            "High" => Some(Level::High),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
